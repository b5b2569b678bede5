/*
 * Responsibility
 * - Offers の request/response DTO
 * - validate() は空白のみの必須項目を弾くだけ (形式チェック)
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::offer_repo::{NewOffer, OfferRow};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub offer_url: String,
}

impl CreateOfferRequest {
    /// 失敗時は `field - must not be blank` を項目順に返す
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let errors: Vec<String> = [
            ("title", &self.title),
            ("company", &self.company),
            ("salary", &self.salary),
            ("offerUrl", &self.offer_url),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| format!("{field} - must not be blank"))
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn into_new_offer(self) -> NewOffer {
        NewOffer {
            title: self.title.trim().to_string(),
            company: self.company.trim().to_string(),
            salary: self.salary.trim().to_string(),
            offer_url: self.offer_url.trim().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferResponse {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub salary: String,
    pub offer_url: String,
}

impl From<OfferRow> for OfferResponse {
    fn from(row: OfferRow) -> Self {
        Self {
            id: row.offer_id,
            title: row.title,
            company: row.company,
            salary: row.salary,
            offer_url: row.offer_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, company: &str, salary: &str, offer_url: &str) -> CreateOfferRequest {
        CreateOfferRequest {
            title: title.into(),
            company: company.into(),
            salary: salary.into(),
            offer_url: offer_url.into(),
        }
    }

    #[test]
    fn blank_fields_are_reported_in_order() {
        let errors = request(" ", "company", " ", "").validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                "title - must not be blank",
                "salary - must not be blank",
                "offerUrl - must not be blank",
            ]
        );
    }

    #[test]
    fn complete_request_is_valid() {
        let req = request("Junior Rust Dev", "Acme", "8k", "https://acme.dev/1");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn missing_json_fields_default_to_blank() {
        let req: CreateOfferRequest = serde_json::from_str(r#"{"title":"t"}"#).unwrap();
        assert_eq!(req.validate().unwrap_err().len(), 3);
    }
}
