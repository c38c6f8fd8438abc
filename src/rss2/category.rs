use crate::model::Category;
use crate::xml::Element;

/// Wire form of a `<category>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub text: String,
    pub domain: Option<String>,
}

impl CategoryRecord {
    pub fn to_element(&self) -> Element {
        let mut element = Element::with_text("category", self.text.as_str());
        if let Some(domain) = &self.domain {
            element.set_attr("domain", domain.as_str());
        }
        element
    }
}

/// Normalizes a category into its wire form. An absent domain is omitted.
pub fn format_category(category: &Category) -> CategoryRecord {
    match category {
        Category::Named(name) => CategoryRecord {
            text: name.clone(),
            domain: None,
        },
        Category::Scoped { name, domain } => CategoryRecord {
            text: name.clone(),
            domain: domain.clone(),
        },
    }
}
