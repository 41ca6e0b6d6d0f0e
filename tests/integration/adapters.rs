//! End-to-end mapping of the fixture products

use chrono::NaiveDate;
use rust_decimal::Decimal;

use onix_mapper::{
    config::BackendKind,
    error::{AppError, ErrorCode},
    services::product::{self, ProductInterface},
};

use super::services;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

async fn legacy_product() -> Box<dyn ProductInterface> {
    services(BackendKind::Legacy)
        .await
        .open_product("100200")
        .await
        .unwrap()
}

async fn work_product() -> Box<dyn ProductInterface> {
    services(BackendKind::Work)
        .await
        .open_product("200300")
        .await
        .unwrap()
}

#[tokio::test]
async fn test_legacy_product_by_gtin() {
    let product = services(BackendKind::Legacy)
        .await
        .open_product("9789510123456")
        .await
        .unwrap();
    assert_eq!(product.record_id(), "L-1");

    let identifiers: Vec<_> = product
        .product_identifiers()
        .into_iter()
        .map(|i| (i.id_type, i.id_value))
        .collect();
    assert_eq!(
        identifiers,
        vec![
            ("01".to_string(), "100200".to_string()),
            ("03".to_string(), "9789510123456".to_string()),
            ("15".to_string(), "9789510123456".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_unknown_and_ambiguous_numbers() {
    let services = services(BackendKind::Legacy).await;

    let err = services.open_product("999999").await.err().unwrap();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.code(), ErrorCode::NoSuchProduct);

    let err = services.open_product("9789510000017").await.err().unwrap();
    assert!(matches!(err, AppError::AmbiguousResult { count: 2, .. }));
}

#[tokio::test]
async fn test_legacy_contributors_ranked() {
    let contributors = legacy_product().await.contributors().await.unwrap();

    let names: Vec<_> = contributors.iter().map(|c| c.last_name.as_str()).collect();
    assert_eq!(names, vec!["Aho", "Kurjenluoma", "Virta"]);

    let sequence: Vec<_> = contributors.iter().map(|c| c.sequence_number).collect();
    assert_eq!(sequence, vec![1, 2, 3]);
    assert_eq!(contributors[2].role, "A12");
    assert_eq!(contributors[2].name_identifier.id_type_name, "Resource ID");
}

#[tokio::test]
async fn test_legacy_subjects() {
    let product = legacy_product().await;
    let subjects = product.subjects().await.unwrap();

    let schemes: Vec<_> = subjects
        .iter()
        .map(|s| s.scheme_id.as_deref().unwrap_or("-"))
        .collect();
    assert_eq!(
        schemes,
        vec!["66", "23", "23", "10", "12", "93", "98", "80", "73", "71", "69", "71", "65", "20"]
    );
    assert_eq!(subjects[0].code.as_deref(), Some("84.2"));
    assert_eq!(subjects[2].heading_text.as_deref(), Some("Dekkarit"));
    assert_eq!(subjects[8].code.as_deref(), Some("L"));
    assert!(subjects.iter().all(|s| !s.is_blank()));

    assert_eq!(
        product.keywords().await.unwrap().as_deref(),
        Some("talvisota;sota;sota")
    );

    // Repeated calls give identical output
    assert_eq!(subjects, product.subjects().await.unwrap());
}

#[tokio::test]
async fn test_legacy_prices() {
    let product = legacy_product().await;
    assert_eq!(product.tax_rate().await.unwrap(), Some(dec("10")));

    let prices = product.prices().await.unwrap();
    let codes: Vec<_> = prices.iter().map(|p| p.price_type_code.as_str()).collect();
    assert_eq!(codes, vec!["05", "07", "01", "02"]);

    let rrp = &prices[3];
    assert_eq!(rrp.amount, dec("17.88"));
    assert_eq!(rrp.tax.taxable_amount, dec("16.25"));
    assert_eq!(rrp.tax.tax_amount, dec("1.63"));

    for price in &prices {
        let sum = price.tax.taxable_amount + price.tax.tax_amount;
        assert!((sum - price.amount).abs() <= dec("0.01"));
        assert_eq!(price.currency, "EUR");
    }
    assert_eq!(prices[0].tax.tax_amount, Decimal::ZERO);

    assert_eq!(prices, product.prices().await.unwrap());
}

#[tokio::test]
async fn test_legacy_audience_texts_and_resources() {
    let product = legacy_product().await;

    let range = product.audience_range().await.unwrap().unwrap();
    assert_eq!((range.qualifier, range.from_age, range.to_age), (17, 12, 15));

    let texts = product.text_contents().await.unwrap();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].text, "<p>Sodan <b>kuvaus</b></p>");

    let resources = product.supporting_resources().unwrap();
    assert_eq!(
        resources[0].url,
        "https://dam.example.fi/file/55/cover.jpg?authcred=dXNlcjpwYXNz"
    );

    assert_eq!(product.latest_reprint_number().await.unwrap(), Some(3));
    assert_eq!(product.publishing_status().unwrap(), Some("01"));
    assert_eq!(product.notification_type(today()), "03");
    assert_eq!(product.measures().len(), 4);
    assert_eq!(product.country_of_manufacture().as_deref(), Some("FI"));
}

#[tokio::test]
async fn test_work_product() {
    let product = work_product().await;
    assert_eq!(product.record_id(), "P-1");
    assert_eq!(product.product_form().as_deref(), Some("AC"));
    assert!(!product.is_immaterial());
    assert_eq!(product.publishing_status().unwrap(), Some("02"));
    assert_eq!(product.notification_type(today()), "02");
    assert_eq!(product.publisher().unwrap().unwrap().name, "Kaamos Audio");

    let titles = product.title_details();
    assert_eq!(titles[0].title_text, "Kuunsilta");
    assert_eq!(titles[1].title_text, "Moonbridge");
    assert_eq!(product.collections()[0].part_number.as_deref(), Some("2"));

    let extents = product.extents();
    assert_eq!(extents[0].extent_value, "0093000");

    let languages: Vec<_> = product.languages().into_iter().map(|l| l.code).collect();
    assert_eq!(languages, vec!["fin", "eng"]);
}

#[tokio::test]
async fn test_work_contributors_and_subjects() {
    let product = work_product().await;

    let contributors = product.contributors().await.unwrap();
    assert_eq!(contributors.len(), 2);
    assert_eq!(contributors[0].inverted_name, "Aho, Juhani");
    assert_eq!(contributors[1].role, "E07");
    assert_eq!(contributors[1].last_name, "Pseudonyymi");
    assert_eq!(contributors[1].first_name, None);

    // Main group 02 suppresses the fiction genre
    let subjects = product.subjects().await.unwrap();
    assert!(subjects.iter().all(|s| s.scheme_id.as_deref() != Some("80")));
    assert_eq!(product.keywords().await.unwrap(), None);
}

#[tokio::test]
async fn test_work_prices_audience_and_lazy_data() {
    let product = work_product().await;

    let prices = product.prices().await.unwrap();
    let rrp = prices.iter().find(|p| p.price_type_code == "02").unwrap();
    assert_eq!(rrp.tax.tax_rate_percent, dec("14"));
    assert_eq!(rrp.tax.taxable_amount, dec("20.00"));
    assert_eq!(rrp.tax.tax_amount, dec("2.80"));

    let range = product.audience_range().await.unwrap().unwrap();
    assert_eq!((range.from_age, range.to_age), (9, 10));

    let texts = product.text_contents().await.unwrap();
    assert_eq!(texts[0].text, "<p>Äänikirja <em>kuusta</em></p>");
    assert_eq!(product.latest_reprint_number().await.unwrap(), Some(1));
}

#[tokio::test]
async fn test_work_backend_rejects_legacy_records() {
    let err = services(BackendKind::Work)
        .await
        .open_product("100200")
        .await
        .err()
        .unwrap();
    assert!(matches!(err, AppError::Backend(_)));
}

#[tokio::test]
async fn test_full_report() {
    let product = legacy_product().await;
    let report = product::report(product.as_ref(), today()).await.unwrap();
    assert_eq!(report.product_number, "100200");
    assert_eq!(report.contributors.len(), 3);
    assert_eq!(report.publisher.as_ref().unwrap().name, "Kustannus Pohjoistuuli Oy");

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["publishingStatus"], "01");
    assert_eq!(json["audienceRange"]["fromAge"], 12);
}
