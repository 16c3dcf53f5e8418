use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row of `profiles`. Created by the external signup flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    /// Centimetres.
    #[serde(default)]
    pub height: Option<f64>,
    /// Kilograms.
    #[serde(default)]
    pub weight: Option<f64>,
    pub created_at: jiff::Timestamp,
}
