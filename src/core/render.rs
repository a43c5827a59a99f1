//! Turns places into result cards with an outbound contact link.

use crate::domain::model::{Place, ResultCard};
use crate::domain::ports::ResultsView;
use crate::utils::error::Result;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

pub const ADDRESS_PLACEHOLDER: &str = "Address not available";
pub const DEFAULT_CONTACT_BASE_URL: &str = "https://wa.me";
pub const DEFAULT_CONTACT_IDENTIFIER: &str = "01033022988";
pub const DEFAULT_CONTACT_LABEL: &str = "Contact via WhatsApp";

/// Everything but `A-Z a-z 0-9 - _ . ! ~ * ( )`. `'` stays encoded since the
/// query serializer of special schemes escapes it anyway.
const MESSAGE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// A fixed messaging identifier on an external messaging service.
#[derive(Debug, Clone)]
pub struct ContactChannel {
    endpoint: Url,
    label: String,
}

impl ContactChannel {
    pub fn new(base_url: &str, identifier: &str, label: impl Into<String>) -> Result<Self> {
        let endpoint = Url::parse(&format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            identifier
        ))?;
        Ok(Self {
            endpoint,
            label: label.into(),
        })
    }

    /// The stock WhatsApp channel.
    pub fn whatsapp() -> Result<Self> {
        Self::new(
            DEFAULT_CONTACT_BASE_URL,
            DEFAULT_CONTACT_IDENTIFIER,
            DEFAULT_CONTACT_LABEL,
        )
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn message_for(place: &Place) -> String {
        format!(
            "I'm interested in {} at {}",
            place.name,
            address_or_placeholder(place)
        )
    }

    /// `<endpoint>?text=<message>`, percent-encoded (`%20` for spaces).
    pub fn link_for(&self, place: &Place) -> Url {
        let message = Self::message_for(place);
        let mut url = self.endpoint.clone();
        url.set_query(Some(&format!(
            "text={}",
            utf8_percent_encode(&message, MESSAGE_ENCODE_SET)
        )));
        url
    }
}

fn address_or_placeholder(place: &Place) -> &str {
    place
        .formatted_address
        .as_deref()
        .filter(|a| !a.is_empty())
        .unwrap_or(ADDRESS_PLACEHOLDER)
}

#[derive(Debug, Clone)]
pub struct ResultRenderer {
    contact: ContactChannel,
}

impl ResultRenderer {
    pub fn new(contact: ContactChannel) -> Self {
        Self { contact }
    }

    pub fn render(&self, place: &Place) -> ResultCard {
        ResultCard {
            title: place.name.clone(),
            subtitle: address_or_placeholder(place).to_string(),
            contact_url: self.contact.link_for(place).to_string(),
            contact_label: self.contact.label().to_string(),
        }
    }

    /// Append-only; clearing the view before a batch is the caller's job.
    pub fn render_into(&self, place: &Place, view: &mut dyn ResultsView) {
        view.append_card(&self.render(place));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    fn encoded_text(url: &str) -> String {
        let url = Url::parse(url).unwrap();
        url.query()
            .and_then(|q| q.strip_prefix("text="))
            .unwrap()
            .to_string()
    }

    fn decoded_text(url: &str) -> String {
        percent_decode_str(&encoded_text(url))
            .decode_utf8()
            .unwrap()
            .into_owned()
    }

    #[test]
    fn test_card_uses_name_and_address() {
        let renderer = ResultRenderer::new(ContactChannel::whatsapp().unwrap());
        let place = Place::new("Bean There").with_address("12 Tahrir Sq, Cairo");

        let card = renderer.render(&place);

        assert_eq!(card.title, "Bean There");
        assert_eq!(card.subtitle, "12 Tahrir Sq, Cairo");
        assert_eq!(card.contact_label, "Contact via WhatsApp");
        assert!(card.contact_url.starts_with("https://wa.me/01033022988?text="));
    }

    #[test]
    fn test_missing_address_falls_back_to_placeholder() {
        let renderer = ResultRenderer::new(ContactChannel::whatsapp().unwrap());
        let card = renderer.render(&Place::new("Mystery Spot"));

        assert_eq!(card.subtitle, ADDRESS_PLACEHOLDER);
        assert_eq!(
            decoded_text(&card.contact_url),
            "I'm interested in Mystery Spot at Address not available"
        );
    }

    #[test]
    fn test_contact_link_decodes_to_name_and_address() {
        let contact = ContactChannel::new("https://wa.me/", "123", "Chat").unwrap();
        let name = "Café & Bar #1 +more?";
        let address = "5/7 Rue d'Été, 100% = ok";
        let place = Place::new(name).with_address(address);

        let link = contact.link_for(&place);
        let text = decoded_text(link.as_str());

        assert_eq!(link.path(), "/123");
        assert_eq!(text, format!("I'm interested in {} at {}", name, address));
        let rest = text.strip_prefix("I'm interested in ").unwrap();
        let (decoded_name, decoded_address) = rest.split_once(" at ").unwrap();
        assert_eq!(decoded_name, name);
        assert_eq!(decoded_address, address);
    }

    #[test]
    fn test_contact_link_uses_percent_encoding() {
        let contact = ContactChannel::new("https://wa.me", "123", "Chat").unwrap();
        let place = Place::new("Cafe 1+1").with_address("5 Main St");

        let encoded = encoded_text(contact.link_for(&place).as_str());

        assert_eq!(
            encoded,
            "I%27m%20interested%20in%20Cafe%201%2B1%20at%205%20Main%20St"
        );
        assert!(!encoded.contains('+'));
        assert_eq!(
            decoded_text(contact.link_for(&place).as_str()),
            "I'm interested in Cafe 1+1 at 5 Main St"
        );
    }

    #[test]
    fn test_contact_link_is_deterministic() {
        let renderer = ResultRenderer::new(ContactChannel::whatsapp().unwrap());
        let place = Place::new("Koshary Abou Tarek").with_address("Champollion St");
        assert_eq!(renderer.render(&place), renderer.render(&place));
    }
}
