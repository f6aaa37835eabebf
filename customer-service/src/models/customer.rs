use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A customer as stored in the `customers` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub street: String,
    #[serde(deserialize_with = "zip_code::deserialize")]
    pub zip: String,
    pub city: String,
}

impl Customer {
    /// Overwrites the six business fields; the identifier is left untouched.
    pub fn overwrite_fields(&mut self, other: &Customer) {
        self.first_name.clone_from(&other.first_name);
        self.last_name.clone_from(&other.last_name);
        self.email.clone_from(&other.email);
        self.street.clone_from(&other.street);
        self.zip.clone_from(&other.zip);
        self.city.clone_from(&other.city);
    }
}

/// Zip codes arrive as JSON strings or numbers; all are kept as strings.
pub mod zip_code {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ZipRepr {
        Text(String),
        Number(u64),
        Float(f64),
    }

    impl From<ZipRepr> for String {
        fn from(zip: ZipRepr) -> Self {
            match zip {
                ZipRepr::Text(s) => s,
                ZipRepr::Number(n) => n.to_string(),
                ZipRepr::Float(f) => f.to_string(),
            }
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        ZipRepr::deserialize(deserializer).map(String::from)
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<ZipRepr>::deserialize(deserializer)?.map(String::from))
    }
}
