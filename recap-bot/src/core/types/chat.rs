use serde::{Deserialize, Serialize};

/// Chat (private, group or channel) identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

impl Chat {
    /// The private chat with a user; its id equals the user id.
    pub fn private(user_id: i64) -> Self {
        Self {
            id: user_id,
            chat_type: "private".to_string(),
        }
    }
}
