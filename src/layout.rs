use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::StorefrontError;

/// UI widgets the page may or may not contain. A missing widget disables its feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Widget {
    CatalogGrid,
    ChatPanel,
    ChatInput,
    CartModal,
    JustificationButton,
    ContactForm,
}

impl Widget {
    pub const ALL: [Widget; 6] = [
        Widget::CatalogGrid,
        Widget::ChatPanel,
        Widget::ChatInput,
        Widget::CartModal,
        Widget::JustificationButton,
        Widget::ContactForm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Widget::CatalogGrid => "catalog-grid",
            Widget::ChatPanel => "chat-panel",
            Widget::ChatInput => "chat-input",
            Widget::CartModal => "cart-modal",
            Widget::JustificationButton => "justification-button",
            Widget::ContactForm => "contact-form",
        }
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Widget {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Widget::ALL.into_iter()
            .find(|w| w.as_str() == wanted)
            .ok_or_else(|| StorefrontError::UnknownWidget(s.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Layout {
    missing: HashSet<Widget>,
}

impl Layout {
    pub fn full() -> Self {
        Self::default()
    }

    pub fn without<I, S>(names: I) -> Result<Self, StorefrontError>
        where I: IntoIterator<Item = S>, S: AsRef<str>
    {
        let mut missing = HashSet::new();
        for name in names {
            if name.as_ref().trim().is_empty() {
                continue;
            }
            missing.insert(name.as_ref().parse::<Widget>()?);
        }
        Ok(Self { missing })
    }

    pub fn has(&self, widget: Widget) -> bool {
        !self.missing.contains(&widget)
    }

    pub fn present(&self) -> Vec<Widget> {
        Widget::ALL.into_iter()
            .filter(|w| self.has(*w))
            .collect()
    }
}
