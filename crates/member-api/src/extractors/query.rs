//! Member listing query extractor

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use member_core::MemberFilter;

use crate::response::ApiError;

/// Raw listing query parameters
///
/// Only `firstName` and `lastName` are accepted. A repeated name keeps its
/// last value.
#[derive(Debug, Default)]
pub struct MemberQueryParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl MemberQueryParams {
    /// Collect decoded `name=value` pairs, rejecting unknown names
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, ApiError> {
        pairs
            .into_iter()
            .try_fold(Self::default(), |mut params, (name, value)| {
                match name.as_str() {
                    "firstName" => params.first_name = Some(value),
                    "lastName" => params.last_name = Some(value),
                    _ => {
                        return Err(ApiError::invalid_query(format!(
                            "unknown parameter `{name}`, expected `firstName` or `lastName`"
                        )))
                    }
                }
                Ok(params)
            })
    }
}

/// Validated listing filter
#[derive(Debug, Clone, Default)]
pub struct MemberQuery(pub MemberFilter);

impl From<MemberQueryParams> for MemberQuery {
    fn from(params: MemberQueryParams) -> Self {
        // `?firstName=` means no filter on that field
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

        Self(MemberFilter {
            first_name: non_empty(params.first_name),
            last_name: non_empty(params.last_name),
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MemberQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        MemberQueryParams::from_pairs(pairs).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(uri: &str) -> Result<MemberQuery, ApiError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        MemberQuery::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_no_params_is_empty_filter() {
        let MemberQuery(filter) = extract("/members").await.unwrap();
        assert!(filter.is_empty());
    }

    #[tokio::test]
    async fn test_both_params() {
        let MemberQuery(filter) = extract("/members?firstName=John&lastName=Tan").await.unwrap();
        assert_eq!(filter.first_name.as_deref(), Some("John"));
        assert_eq!(filter.last_name.as_deref(), Some("Tan"));
    }

    #[tokio::test]
    async fn test_empty_value_is_ignored() {
        let MemberQuery(filter) = extract("/members?firstName=&lastName=Tan").await.unwrap();
        assert_eq!(filter.first_name, None);
        assert_eq!(filter.last_name.as_deref(), Some("Tan"));
    }

    #[tokio::test]
    async fn test_unknown_param_is_rejected() {
        let err = extract("/members?email=johntan@gmail.com").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidQuery(_)));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_repeated_param_keeps_last_value() {
        let MemberQuery(filter) = extract("/members?firstName=A&firstName=B").await.unwrap();
        assert_eq!(filter.first_name.as_deref(), Some("B"));
        assert_eq!(filter.last_name, None);
    }

    #[tokio::test]
    async fn test_encoded_values_are_decoded() {
        let MemberQuery(filter) = extract("/members?lastName=Tan%20Ah%20Kow").await.unwrap();
        assert_eq!(filter.last_name.as_deref(), Some("Tan Ah Kow"));
    }

    #[tokio::test]
    async fn test_snake_case_name_is_unknown() {
        assert!(extract("/members?first_name=John").await.is_err());
    }
}
