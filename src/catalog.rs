use crate::models::catalog::Product;
use once_cell::sync::Lazy;
use serde::Serialize;

static PPE_CATALOG: Lazy<Catalog> = Lazy::new(|| {
    Catalog::new(
        vec![
            Product::new(
                "G001",
                "AAMI Level 2 Isolation Gown",
                "$12.50",
                "Fluid-resistant, non-sterile gown for low-risk situations. Made in USA.",
                "https://picsum.photos/seed/gown/400/300"
            ),
            Product::new(
                "M002",
                "NIOSH N95 Respirator Mask",
                "$2.80",
                "Filters at least 95% of airborne particles. Comfortable and secure fit.",
                "https://picsum.photos/seed/mask/400/300"
            ),
            Product::new(
                "L003",
                "Nitrile Examination Gloves",
                "$0.45 / pair",
                "Latex-free, powder-free gloves with excellent tactile sensitivity. (Box of 100)",
                "https://picsum.photos/seed/gloves/400/300"
            ),
            Product::new(
                "S004",
                "Disposable Face Shield",
                "$5.00",
                "Full-face protection against splashes and sprays. Anti-fog and optically clear.",
                "https://picsum.photos/seed/shield/400/300"
            )
        ]
    )
});

/// Immutable product list, fixed at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

/// One rendered product card. `add_action` is the id the "Add to Cart" control is tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub add_action: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub image_alt: String,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The storefront's built-in PPE catalog.
    pub fn ppe() -> &'static Catalog {
        &PPE_CATALOG
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

pub fn render_products(catalog: &Catalog) -> Vec<ProductCard> {
    catalog.products
        .iter()
        .map(|product| ProductCard {
            add_action: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.clone(),
            image: product.image.clone(),
            image_alt: product.name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_card_per_product_in_catalog_order() {
        let catalog = Catalog::ppe();
        let cards = render_products(catalog);

        let ids: Vec<&str> = cards
            .iter()
            .map(|c| c.add_action.as_str())
            .collect();
        assert_eq!(ids, vec!["G001", "M002", "L003", "S004"]);
        assert_eq!(cards[2].price, "$0.45 / pair");
        assert_eq!(cards[1].image_alt, "NIOSH N95 Respirator Mask");
    }

    #[test]
    fn rendering_is_idempotent() {
        let catalog = Catalog::ppe();
        assert_eq!(render_products(catalog), render_products(catalog));
    }

    #[test]
    fn find_matches_exact_id_only() {
        let catalog = Catalog::ppe();
        assert_eq!(catalog.find("S004").map(|p| p.name.as_str()), Some("Disposable Face Shield"));
        assert!(catalog.find("s004").is_none());
        assert!(catalog.find("").is_none());
    }
}
