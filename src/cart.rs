use crate::models::catalog::Product;

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// Insertion-ordered cart. Duplicates are kept; there is no removal.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    items: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub name: String,
    pub count: usize,
}

impl CartLine {
    pub fn label(&self) -> String {
        format!("{}x {}", self.count, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartSummary {
    Empty,
    Lines(Vec<CartLine>),
}

impl CartSummary {
    /// Display lines, or the single empty-cart message.
    pub fn labels(&self) -> Vec<String> {
        match self {
            CartSummary::Empty => vec![EMPTY_CART_MESSAGE.to_string()],
            CartSummary::Lines(lines) => lines.iter().map(CartLine::label).collect(),
        }
    }
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, product: Product) {
        self.items.push(product);
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Groups entries by product name, in order of first occurrence.
    /// Different ids sharing a name collapse into one line.
    pub fn summary(&self) -> CartSummary {
        if self.items.is_empty() {
            return CartSummary::Empty;
        }

        let mut lines: Vec<CartLine> = Vec::new();
        for item in &self.items {
            match lines.iter_mut().find(|line| line.name == item.name) {
                Some(line) => {
                    line.count += 1;
                }
                None =>
                    lines.push(CartLine {
                        name: item.name.clone(),
                        count: 1,
                    }),
            }
        }
        CartSummary::Lines(lines)
    }
}
