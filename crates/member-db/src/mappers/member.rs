//! Member entity <-> model mapper

use member_core::entities::Member;

use crate::models::MemberModel;

/// Convert MemberModel to Member entity
impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        Member {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            age: model.age,
            is_employee: model.is_employee,
            created_at: model.created_at,
        }
    }
}
