use serde::{ Deserialize, Serialize };

/// A purchasable item. `price` is display text, never parsed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: String,
    pub description: String,
    pub image: String,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            description: description.into(),
            image: image.into(),
        }
    }
}
