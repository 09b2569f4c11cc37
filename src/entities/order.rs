use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{money::Money, Extra};
use crate::{
    endpoints::SquareEndpoint,
    error::{Error, Result},
    utils::serde_helpers::null_as_default,
    Client,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum State {
    Open,
    Completed,
    Canceled,
    Draft,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Square sends quantities as decimal strings, e.g. `"1"` or `"0.5"`.
    pub quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_object_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price_money: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_money: Option<Money>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenderType {
    Card,
    Cash,
    Other,
    SquareGiftCard,
    NoSale,
    BankAccount,
    Wallet,
    BuyNowPayLater,
    SquareAccount,
    #[serde(untagged)]
    Unknown(String),
}

impl std::fmt::Display for TenderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::String(name)) => f.write_str(&name),
            _ => write!(f, "{self:?}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_4: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tender {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub r#type: TenderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_money: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_details: Option<CardDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub location_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub line_items: Vec<LineItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tenders: Vec<Tender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_money: Option<Money>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub created_at: Option<OffsetDateTime>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub updated_at: Option<OffsetDateTime>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A billable service taken from one of an order's line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub variation_name: Option<String>,
    /// Line total in major currency units.
    pub amount: Decimal,
    pub quantity: u32,
}

impl Order {
    /// The line items whose name is one of `allowed`, compared
    /// case-insensitively, as billable services.
    ///
    /// Fails on the first matching line item whose quantity is not a whole number.
    pub fn services(&self, allowed: &[&str]) -> Result<Vec<Service>> {
        self.line_items
            .iter()
            .filter_map(|item| {
                let name = item.name.as_deref()?;
                allowed
                    .iter()
                    .any(|candidate| candidate.to_lowercase() == name.to_lowercase())
                    .then_some((item, name))
            })
            .map(|(item, name)| {
                let quantity = item.quantity.trim().parse::<u32>().map_err(|_| {
                    Error::InvalidQuantity {
                        line_item: name.to_string(),
                        quantity: item.quantity.clone(),
                    }
                })?;
                Ok(Service {
                    name: name.to_string(),
                    variation_name: item.variation_name.clone(),
                    amount: item
                        .total_money
                        .as_ref()
                        .map(Money::to_decimal)
                        .unwrap_or_default(),
                    quantity,
                })
            })
            .collect()
    }

    /// A human-readable reference for how the order was paid, based on its
    /// first tender.
    #[must_use]
    pub fn tender_reference(&self) -> String {
        let Some(tender) = self.tenders.first() else {
            return "Square".to_string();
        };

        match &tender.r#type {
            TenderType::Card => {
                let card = tender.card_details.as_ref().and_then(|d| d.card.as_ref());
                match card {
                    Some(card) => format!(
                        "Square {} ****{}",
                        card.card_brand.as_deref().unwrap_or("CARD"),
                        card.last_4.as_deref().unwrap_or_default()
                    ),
                    None => "Square CARD".to_string(),
                }
            }
            TenderType::Cash => "Square Cash".to_string(),
            TenderType::Other => "EXTERNAL".to_string(),
            other => format!("Square {other}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    ClosedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Sort {
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
}

/// Body of a `POST /v2/orders/search` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchParameters {
    pub location_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
}

impl SearchParameters {
    #[must_use]
    pub fn for_location(location_id: impl Into<String>) -> Self {
        Self {
            location_ids: vec![location_id.into()],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Return the newest orders first.
    #[must_use]
    pub fn newest_first(mut self) -> Self {
        self.query = Some(Query {
            sort: Some(Sort::default()),
        });
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Deserialize)]
struct GetResponse {
    order: Option<Order>,
}

/// Retrieve a single order by its id.
#[instrument(skip(client))]
pub async fn get(client: &Client, order_id: &str) -> Result<Order> {
    let endpoint = SquareEndpoint::Order(order_id.to_string());
    let response: GetResponse = client.get_endpoint(endpoint.clone(), &()).await?;
    response.order.ok_or_else(|| Error::NotFound {
        entity: "Order".to_string(),
        url: endpoint.to_string(),
    })
}

/// Search orders across the given locations.
#[instrument(skip(client))]
pub async fn search(client: &Client, parameters: &SearchParameters) -> Result<SearchResponse> {
    client
        .post_endpoint(SquareEndpoint::SearchOrders, parameters)
        .await
}
