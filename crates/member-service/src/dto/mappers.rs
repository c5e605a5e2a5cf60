//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use member_core::entities::Member;

use super::responses::MemberResponse;

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
            age: member.age,
            is_employee: member.is_employee,
            created_at: member.created_at,
        }
    }
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            first_name: member.first_name,
            last_name: member.last_name,
            email: member.email,
            phone: member.phone,
            age: member.age,
            is_employee: member.is_employee,
            created_at: member.created_at,
        }
    }
}
