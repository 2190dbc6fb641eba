use crate::contract::model::User;
use crate::infra::storage::entity::Model;

impl From<Model> for User {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            firebase_uid: m.firebase_uid,
            email: m.email,
            display_name: m.display_name,
            city: m.city,
            country: m.country,
            address: m.address,
            age: m.age,
        }
    }
}
