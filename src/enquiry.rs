//! WhatsApp enquiry deep links.
//!
//! The storefront's only "checkout" is a wa.me link with a pre-filled
//! message naming the visitor's shop and the product they are looking at.
//! No server interaction.

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EnquiryError {
    #[error("shop name is required")]
    MissingShopName,
    #[error("invalid WhatsApp number")]
    InvalidNumber,
}

#[derive(Clone, Debug)]
pub struct Enquiry {
    pub shop_name: String,
    pub product_name: String,
    pub whatsapp_number: String,
}

impl Enquiry {
    pub fn new(
        shop_name: impl Into<String>,
        product_name: impl Into<String>,
        whatsapp_number: impl Into<String>,
    ) -> Self {
        Self {
            shop_name: shop_name.into(),
            product_name: product_name.into(),
            whatsapp_number: whatsapp_number.into(),
        }
    }

    pub fn message(&self) -> String {
        format!(
            "Hi, I'm from {}. I'm interested in the product: {}",
            self.shop_name.trim(),
            self.product_name
        )
    }

    /// The deep link the form opens. A blank shop name refuses to submit.
    pub fn link(&self) -> Result<Url, EnquiryError> {
        if self.shop_name.trim().is_empty() {
            return Err(EnquiryError::MissingShopName);
        }
        let mut url = Url::parse(&format!("https://wa.me/{}", self.whatsapp_number.trim()))
            .map_err(|_| EnquiryError::InvalidNumber)?;
        url.query_pairs_mut().append_pair("text", &self.message());
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_text() {
        let e = Enquiry::new("Gulf Motors", "Brake Pad Set", "97312345678");
        assert_eq!(
            e.message(),
            "Hi, I'm from Gulf Motors. I'm interested in the product: Brake Pad Set"
        );
    }

    #[test]
    fn test_link_targets_wa_me_with_encoded_text() {
        let e = Enquiry::new("Gulf Motors", "Brake Pad Set", "97312345678");
        let url = e.link().unwrap();
        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/97312345678");
        let (key, text) = url.query_pairs().next().unwrap();
        assert_eq!(key, "text");
        assert_eq!(
            text,
            "Hi, I'm from Gulf Motors. I'm interested in the product: Brake Pad Set"
        );
    }

    #[test]
    fn test_blank_shop_name_is_rejected() {
        let e = Enquiry::new("   ", "Brake Pad Set", "97312345678");
        assert_eq!(e.link(), Err(EnquiryError::MissingShopName));
    }

    #[test]
    fn test_shop_name_is_trimmed_in_message() {
        let e = Enquiry::new("  Gulf Motors ", "Oil Filter", "97312345678");
        assert!(e.message().starts_with("Hi, I'm from Gulf Motors."));
    }
}
