use rust_decimal_macros::dec;
use serde_json::json;
use square_smoke::customer::Customer;
use square_smoke::invoice::{self, Invoice};
use square_smoke::location::{self, Location};
use square_smoke::money::Money;
use square_smoke::order::{self, Order, Service, TenderType};
use square_smoke::{Error, Verbatim};

/// An order as Square returns it for an invoice-backed sale, trimmed to the
/// fields that matter here but keeping the explicit nulls.
fn invoice_order() -> serde_json::Value {
    json!({
        "id": "VADlh2ria85Z6NH2SbmB5BmB9fZZY",
        "location_id": "L71XXT7NHQ2D3",
        "reference_id": null,
        "source": { "name": "Invoices" },
        "customer_id": "J008FJQT7VFGA087YCB2YKHHGM",
        "line_items": [
            {
                "uid": "ea7746a6-6804-4a72-9bc4-23014331ed53",
                "name": "Payments 2/2",
                "quantity": "1",
                "quantity_unit": null,
                "catalog_object_id": null,
                "variation_name": null,
                "item_type": "ITEM",
                "base_price_money": { "amount": 391444, "currency": "USD" },
                "total_money": { "amount": 391444, "currency": "USD" }
            }
        ],
        "taxes": null,
        "tenders": null,
        "refunds": null,
        "created_at": "2025-09-30T14:03:29.464Z",
        "updated_at": "2025-09-30T14:03:30.157Z",
        "state": "OPEN",
        "version": 4,
        "total_money": { "amount": 391444, "currency": "USD" }
    })
}

#[test]
fn order_with_null_collections() {
    let order: Order = serde_json::from_value(invoice_order()).unwrap();

    assert_eq!(order.customer_id.as_deref(), Some("J008FJQT7VFGA087YCB2YKHHGM"));
    assert_eq!(order.state, Some(order::State::Open));
    assert!(order.tenders.is_empty());
    assert_eq!(order.line_items.len(), 1);
    assert_eq!(order.line_items[0].quantity, "1");
    assert_eq!(
        order.total_money.as_ref().map(Money::to_decimal),
        Some(dec!(3914.44))
    );
    assert_eq!(order.extra["source"]["name"], "Invoices");
}

#[test]
fn tender_reference_without_tenders() {
    let order: Order = serde_json::from_value(invoice_order()).unwrap();
    assert_eq!(order.tender_reference(), "Square");
}

fn order_with_tender(tender: serde_json::Value) -> Order {
    let mut value = invoice_order();
    value["tenders"] = json!([tender]);
    serde_json::from_value(value).unwrap()
}

#[test]
fn tender_reference_for_each_type() {
    let card = order_with_tender(json!({
        "id": "tender-1",
        "type": "CARD",
        "card_details": { "card": { "card_brand": "VISA", "last_4": "1111" } }
    }));
    assert_eq!(card.tender_reference(), "Square VISA ****1111");

    let cash = order_with_tender(json!({ "type": "CASH" }));
    assert_eq!(cash.tender_reference(), "Square Cash");

    let other = order_with_tender(json!({ "type": "OTHER" }));
    assert_eq!(other.tender_reference(), "EXTERNAL");

    let wallet = order_with_tender(json!({ "type": "WALLET" }));
    assert_eq!(wallet.tender_reference(), "Square WALLET");

    let unknown = order_with_tender(json!({ "type": "CRYPTO" }));
    assert_eq!(
        unknown.tenders[0].r#type,
        TenderType::Unknown("CRYPTO".to_string())
    );
    assert_eq!(unknown.tender_reference(), "Square CRYPTO");
}

#[test]
fn search_parameters_body() {
    let parameters = order::SearchParameters::for_location("L71XXT7NHQ2D3")
        .limit(1)
        .newest_first();

    assert_eq!(
        serde_json::to_value(&parameters).unwrap(),
        json!({
            "location_ids": ["L71XXT7NHQ2D3"],
            "limit": 1,
            "query": { "sort": { "sort_field": "CREATED_AT", "sort_order": "DESC" } }
        })
    );
}

#[test]
fn location_keeps_unmodelled_fields() {
    let value = json!({
        "id": "L71XXT7NHQ2D3",
        "name": "Downtown Studio",
        "status": "ACTIVE",
        "timezone": "America/New_York",
        "capabilities": ["CREDIT_CARD_PROCESSING"],
        "created_at": "2023-04-12T18:21:07.000Z",
        "address": { "address_line_1": "1 Main St", "locality": "Miami" }
    });

    let location: Location = serde_json::from_value(value.clone()).unwrap();
    assert_eq!(location.status, Some(location::Status::Active));
    assert_eq!(location.summary(), "L71XXT7NHQ2D3 • Downtown Studio");
    assert_eq!(location.extra["capabilities"][0], "CREDIT_CARD_PROCESSING");

    let round_tripped = serde_json::to_value(&location).unwrap();
    assert_eq!(round_tripped["capabilities"], value["capabilities"]);
    assert_eq!(round_tripped["address"], value["address"]);
}

#[test]
fn location_without_name() {
    let location: Location = serde_json::from_value(json!({ "id": "L1" })).unwrap();
    assert_eq!(location.summary(), "L1 • ");
    assert_eq!(serde_json::to_value(&location).unwrap(), json!({ "id": "L1" }));
}

#[test]
fn location_with_unlisted_status() {
    let response: location::ListResponse = serde_json::from_value(json!({
        "locations": [{ "id": "L1", "name": "Studio", "status": "PENDING" }]
    }))
    .unwrap();
    assert_eq!(
        response.locations[0].status,
        Some(location::Status::Other("PENDING".to_string()))
    );
    assert_eq!(
        serde_json::to_value(&response.locations[0]).unwrap()["status"],
        "PENDING"
    );
}

#[test]
fn empty_invoice_list() {
    let response: invoice::ListResponse = serde_json::from_value(json!({})).unwrap();
    assert!(response.invoices.is_empty());
    assert!(response.cursor.is_none());
}

#[test]
fn invoice_list_is_reproduced_as_received() {
    let body = json!({
        "invoices": [
            {
                "id": "inv:1",
                "created_at": "2025-09-30T14:03:29.000Z",
                "payment_requests": [],
                "title": null
            }
        ]
    });

    let response: Verbatim<invoice::ListResponse> = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(response.value.invoices.len(), 1);
    assert_eq!(response.value.invoices[0].id, "inv:1");
    assert!(response.value.invoices[0].title.is_none());

    assert_eq!(serde_json::to_value(&response).unwrap(), body);
}

#[test]
fn invoice_list_keeps_key_order() {
    let text = r#"{"invoices":[{"status":"UNPAID","id":"inv:1","version":2}],"cursor":"c1"}"#;
    let response: Verbatim<invoice::ListResponse> = serde_json::from_str(text).unwrap();
    assert_eq!(serde_json::to_string(&response).unwrap(), text);
}

#[test]
fn invoice_status_and_recipient() {
    let invoice: Invoice = serde_json::from_value(json!({
        "id": "inv:0-ChCHu2mZEabLeeHahQnXDjZQECY",
        "location_id": "L71XXT7NHQ2D3",
        "status": "PARTIALLY_PAID",
        "primary_recipient": {
            "customer_id": "J008FJQT7VFGA087YCB2YKHHGM",
            "given_name": "Ismarys",
            "family_name": "Mato Cabrera"
        },
        "payment_requests": [
            {
                "uid": "2da7964f-f3d2-4f43-81e8-5aa220bf3355",
                "request_type": "BALANCE",
                "due_date": "2025-10-15",
                "computed_amount_money": { "amount": 391444, "currency": "USD" },
                "automatic_payment_source": "NONE"
            }
        ],
        "accepted_payment_methods": { "card": true, "bank_account": false }
    }))
    .unwrap();

    assert_eq!(invoice.status, Some(invoice::Status::PartiallyPaid));
    assert_eq!(
        invoice.primary_recipient.unwrap().given_name.as_deref(),
        Some("Ismarys")
    );
    assert_eq!(invoice.payment_requests[0].extra["automatic_payment_source"], "NONE");
    assert_eq!(invoice.extra["accepted_payment_methods"]["card"], true);
}

#[test]
fn invoice_list_limit_is_clamped() {
    assert_eq!(invoice::ListParameters::new("L1").limit(0).limit, Some(1));
    assert_eq!(
        invoice::ListParameters::new("L1").limit(1_000).limit,
        Some(invoice::MAX_PAGE_SIZE)
    );
}

#[test]
fn customer_display_name() {
    let customer: Customer = serde_json::from_value(json!({
        "id": "J008FJQT7VFGA087YCB2YKHHGM",
        "given_name": "Ismarys",
        "family_name": "Mato Cabrera",
        "email_address": "customer@example.com"
    }))
    .unwrap();
    assert_eq!(customer.display_name(), "Ismarys Mato Cabrera");

    let only_family: Customer =
        serde_json::from_value(json!({ "id": "C2", "family_name": "Lee" })).unwrap();
    assert_eq!(only_family.display_name(), "Lee");
}

#[test]
fn money_without_amount_is_zero() {
    assert_eq!(Money::default().to_decimal(), dec!(0));
}

const ALLOWED_SERVICES: &[&str] = &[
    "beauty services (discounted)",
    "deposit - photoshoot collections",
];

fn order_with_line_items(line_items: serde_json::Value) -> Order {
    let mut value = invoice_order();
    value["line_items"] = line_items;
    serde_json::from_value(value).unwrap()
}

#[test]
fn services_match_allowed_names_ignoring_case() {
    let order = order_with_line_items(json!([
        {
            "name": "Beauty Services (Discounted)",
            "quantity": "2",
            "variation_name": "Full glam",
            "total_money": { "amount": 25000, "currency": "USD" }
        },
        {
            "name": "Payments 2/2",
            "quantity": "1",
            "total_money": { "amount": 391444, "currency": "USD" }
        },
        {
            "name": "DEPOSIT - PHOTOSHOOT COLLECTIONS",
            "quantity": "1",
            "variation_name": null
        }
    ]));

    assert_eq!(
        order.services(ALLOWED_SERVICES).unwrap(),
        vec![
            Service {
                name: "Beauty Services (Discounted)".to_string(),
                variation_name: Some("Full glam".to_string()),
                amount: dec!(250.00),
                quantity: 2,
            },
            Service {
                name: "DEPOSIT - PHOTOSHOOT COLLECTIONS".to_string(),
                variation_name: None,
                amount: dec!(0),
                quantity: 1,
            },
        ]
    );
}

#[test]
fn services_skip_other_line_items() {
    let order: Order = serde_json::from_value(invoice_order()).unwrap();
    assert!(order.services(ALLOWED_SERVICES).unwrap().is_empty());
}

#[test]
fn services_reject_fractional_quantity() {
    let order = order_with_line_items(json!([
        { "name": "beauty services (discounted)", "quantity": "0.5" }
    ]));

    match order.services(ALLOWED_SERVICES) {
        Err(Error::InvalidQuantity { line_item, quantity }) => {
            assert_eq!(line_item, "beauty services (discounted)");
            assert_eq!(quantity, "0.5");
        }
        other => panic!("expected InvalidQuantity, got {other:?}"),
    }
}
