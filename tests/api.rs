#[macro_use]
mod common;

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use rust_decimal_macros::dec;
use serde_json::{Value, json};

use common::{TestContext, basic_auth};
use tinycrm::domain::company::CompanyData;
use tinycrm::domain::product::ProductData;
use tinycrm::domain::remit::{RemitInformationData, RemitLineData};

fn company(name: &str, document: &str) -> Value {
  json!({ "name": name, "document": document, "address": "Rua das Flores, 10" })
}

fn invoice_body(remit_id: i64, company_id: i64, client_id: i64, lines: Value) -> Value {
  json!({
    "discount": 10.0,
    "penalty": 5.0,
    "issue_date": "2024-01-31T12:00:00Z",
    "due_date": "2024-03-10T12:00:00Z",
    "remit_information_id": remit_id,
    "company_id": company_id,
    "client_id": client_id,
    "invoice_lines": lines
  })
}

#[actix_web::test]
async fn test_health_is_public() {
  let ctx = TestContext::new().await;
  let app = init_app!(ctx);

  let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(test::read_body(resp).await, "OK");
}

#[actix_web::test]
async fn test_index_page_is_public() {
  let ctx = TestContext::new().await;
  let app = init_app!(ctx);

  let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = test::read_body(resp).await;
  assert!(String::from_utf8_lossy(&body).contains("Tiny CRM"));
}

#[actix_web::test]
async fn test_api_requires_credentials() {
  let ctx = TestContext::new().await;
  let app = init_app!(ctx);

  let resp = test::call_service(&app, TestRequest::get().uri("/api/companies").to_request()).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  assert_eq!(
    resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
    "Basic realm=\"Tiny CRM\""
  );

  let req = TestRequest::get()
    .uri("/api/companies")
    .insert_header(basic_auth(common::USERNAME, "wrong"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let req = TestRequest::get()
    .uri("/api/companies")
    .insert_header(basic_auth("nobody", common::PASSWORD))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let req = TestRequest::get()
    .uri("/api/companies")
    .insert_header(ctx.auth())
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_logout_always_challenges() {
  let ctx = TestContext::new().await;
  let app = init_app!(ctx);

  let req = TestRequest::post()
    .uri("/api/logout")
    .insert_header(ctx.auth())
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
}

#[actix_web::test]
async fn test_company_crud_round_trip() {
  let ctx = TestContext::new().await;
  let app = init_app!(ctx);

  let req = TestRequest::post()
    .uri("/api/companies")
    .insert_header(ctx.auth())
    .set_json(company("Acme Ltda", "12.345.678/0001-90"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let created: Value = test::read_body_json(resp).await;
  let id = created["id"].as_i64().unwrap();

  let req = TestRequest::get()
    .uri(&format!("/api/companies/{}", id))
    .insert_header(ctx.auth())
    .to_request();
  let fetched: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(fetched["name"], "Acme Ltda");
  assert_eq!(fetched["document"], "12.345.678/0001-90");
  assert_eq!(fetched["address"], "Rua das Flores, 10");

  let req = TestRequest::put()
    .uri(&format!("/api/companies/{}", id))
    .insert_header(ctx.auth())
    .set_json(company("Acme S.A.", "99"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let updated: Value = test::read_body_json(resp).await;
  assert_eq!(updated["id"], id);
  assert_eq!(updated["name"], "Acme S.A.");

  let req = TestRequest::get()
    .uri("/api/companies")
    .insert_header(ctx.auth())
    .to_request();
  let list: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(list.as_array().unwrap().len(), 1);

  let req = TestRequest::delete()
    .uri(&format!("/api/companies/{}", id))
    .insert_header(ctx.auth())
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);

  let req = TestRequest::get()
    .uri(&format!("/api/companies/{}", id))
    .insert_header(ctx.auth())
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_client_errors() {
  let ctx = TestContext::new().await;
  let app = init_app!(ctx);

  let req = TestRequest::get()
    .uri("/api/companies/abc")
    .insert_header(ctx.auth())
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let req = TestRequest::post()
    .uri("/api/companies")
    .insert_header(ctx.auth())
    .insert_header((header::CONTENT_TYPE, "application/json"))
    .set_payload("{\"name\": ")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "validation_error");

  let req = TestRequest::post()
    .uri("/api/companies")
    .insert_header(ctx.auth())
    .set_json(company("", "123"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let req = TestRequest::post()
    .uri("/api/products")
    .insert_header(ctx.auth())
    .set_json(json!({ "name": "Hosting", "price": -1.0 }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_unknown_ids_are_not_found() {
  let ctx = TestContext::new().await;
  let app = init_app!(ctx);

  for uri in [
    "/api/companies/99",
    "/api/products/99",
    "/api/remit/99",
    "/api/invoices/99",
  ] {
    let req = TestRequest::get()
      .uri(uri)
      .insert_header(ctx.auth())
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND, "GET {}", uri);

    let req = TestRequest::delete()
      .uri(uri)
      .insert_header(ctx.auth())
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND, "DELETE {}", uri);
  }

  let req = TestRequest::put()
    .uri("/api/companies/99")
    .insert_header(ctx.auth())
    .set_json(company("Ghost", "1"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

/// Creates issuer, client, two products and a remit record.
/// Returns `(remit_id, company_id, client_id, product_a, product_b)`.
async fn seed(ctx: &TestContext) -> (i64, i64, i64, i64, i64) {
  let deps = &ctx.deps;
  let company = |name: &str, document: &str| CompanyData {
    name: name.to_string(),
    document: document.to_string(),
    address: "Rua das Flores, 10".to_string(),
  };

  let issuer = deps
    .company_service
    .create_company(company("Acme Ltda", "1"))
    .await
    .unwrap();
  let client = deps
    .company_service
    .create_company(company("Beta Comercio Ltda", "2"))
    .await
    .unwrap();
  let consulting = deps
    .product_service
    .create_product(ProductData {
      name: "Consulting".to_string(),
      description: Some("Hourly".to_string()),
      price: dec!(100.50),
    })
    .await
    .unwrap();
  let hosting = deps
    .product_service
    .create_product(ProductData {
      name: "Hosting".to_string(),
      description: None,
      price: dec!(20),
    })
    .await
    .unwrap();
  let remit = deps
    .remit_service
    .create_remit_information(RemitInformationData {
      name: "Main account".to_string(),
      lines: vec![
        RemitLineData {
          key: "Bank".to_string(),
          value: "001".to_string(),
        },
        RemitLineData {
          key: "Agency".to_string(),
          value: "1234-5".to_string(),
        },
      ],
    })
    .await
    .unwrap();

  (remit.id, issuer.id, client.id, consulting.id, hosting.id)
}

#[actix_web::test]
async fn test_invoice_lifecycle() {
  let ctx = TestContext::new().await;
  let app = init_app!(ctx);
  let (remit_id, company_id, client_id, product_a, product_b) = seed(&ctx).await;

  let body = invoice_body(
    remit_id,
    company_id,
    client_id,
    json!([
      { "product_id": product_a, "quantity": 2 },
      { "product_id": product_b, "quantity": 3, "description": "Monthly" }
    ]),
  );
  let req = TestRequest::post()
    .uri("/api/invoices")
    .insert_header(ctx.auth())
    .set_json(body)
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let invoice: Value = test::read_body_json(resp).await;
  let invoice_id = invoice["id"].as_i64().unwrap();

  // 100.50 * 2 + 20 * 3 - 10 + 5
  assert_eq!(invoice["subtotal"].as_f64(), Some(261.0));
  assert_eq!(invoice["total"].as_f64(), Some(256.0));
  assert_eq!(invoice["repr"], "BetaComercioLtda_invoice_20240131");
  assert_eq!(invoice["due_month"], "Março");
  assert_eq!(invoice["identification"], invoice["uuid"]);
  assert_eq!(invoice["client"]["name"], "Beta Comercio Ltda");
  assert_eq!(invoice["remit_information"]["lines"].as_array().unwrap().len(), 2);
  assert_eq!(invoice["invoice_lines"].as_array().unwrap().len(), 2);
  assert_eq!(invoice["invoice_lines"][0]["total"].as_f64(), Some(201.0));
  assert!(!invoice["paid"].as_bool().unwrap());

  // Update replaces the whole line set
  let mut body = invoice_body(
    remit_id,
    company_id,
    client_id,
    json!([{ "product_id": product_b }]),
  );
  body["number"] = json!(17);
  body["paid"] = json!(true);
  let req = TestRequest::put()
    .uri(&format!("/api/invoices/{}", invoice_id))
    .insert_header(ctx.auth())
    .set_json(body)
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let updated: Value = test::read_body_json(resp).await;
  assert_eq!(updated["uuid"], invoice["uuid"]);
  assert_eq!(updated["identification"], "17");
  assert_eq!(updated["invoice_lines"].as_array().unwrap().len(), 1);
  assert_eq!(updated["invoice_lines"][0]["product_id"], product_b);
  assert_eq!(updated["invoice_lines"][0]["quantity"], 1);
  assert_eq!(updated["total"].as_f64(), Some(15.0));

  // Referenced records can not be deleted
  for uri in [
    format!("/api/products/{}", product_b),
    format!("/api/companies/{}", client_id),
    format!("/api/remit/{}", remit_id),
  ] {
    let req = TestRequest::delete()
      .uri(&uri)
      .insert_header(ctx.auth())
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "DELETE {}", uri);
  }

  let req = TestRequest::delete()
    .uri(&format!("/api/invoices/{}", invoice_id))
    .insert_header(ctx.auth())
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);

  let req = TestRequest::delete()
    .uri(&format!("/api/products/{}", product_b))
    .insert_header(ctx.auth())
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);

  let req = TestRequest::delete()
    .uri(&format!("/api/remit/{}", remit_id))
    .insert_header(ctx.auth())
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn test_invoice_rejects_zero_quantity() {
  let ctx = TestContext::new().await;
  let app = init_app!(ctx);
  let (remit_id, company_id, client_id, product_a, _) = seed(&ctx).await;

  let req = TestRequest::post()
    .uri("/api/invoices")
    .insert_header(ctx.auth())
    .set_json(invoice_body(
      remit_id,
      company_id,
      client_id,
      json!([{ "product_id": product_a, "quantity": 0 }]),
    ))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "validation_error");
  assert_eq!(
    body["message"],
    "invoice_lines[0].quantity: Quantity must be at least 1"
  );

  let req = TestRequest::get()
    .uri("/api/invoices")
    .insert_header(ctx.auth())
    .to_request();
  let list: Value = test::call_and_read_body_json(&app, req).await;
  assert!(list.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_invoice_documents() {
  let ctx = TestContext::new().await;
  let app = init_app!(ctx);
  let (remit_id, company_id, client_id, product_a, _) = seed(&ctx).await;

  let req = TestRequest::post()
    .uri("/api/invoices")
    .insert_header(ctx.auth())
    .set_json(invoice_body(
      remit_id,
      company_id,
      client_id,
      json!([{ "product_id": product_a }]),
    ))
    .to_request();
  let invoice: Value = test::call_and_read_body_json(&app, req).await;
  let invoice_id = invoice["id"].as_i64().unwrap();

  let req = TestRequest::get()
    .uri("/api/list_invoice_templates")
    .insert_header(ctx.auth())
    .to_request();
  let templates: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(templates, json!(["alternative.html", "default.html"]));

  let req = TestRequest::get()
    .uri(&format!("/api/invoices/{}/open?template=default.html", invoice_id))
    .insert_header(ctx.auth())
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
  assert!(content_type.to_str().unwrap().starts_with("text/html"));
  assert_eq!(
    resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
    "inline; filename=\"BetaComercioLtda_invoice_20240131.html\""
  );
  let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
  assert!(html.contains("<h1>BetaComercioLtda_invoice_20240131</h1>"));
  assert!(html.contains("Beta Comercio Ltda"));
  assert!(html.contains("Março"));
  assert!(html.contains(invoice["uuid"].as_str().unwrap()));

  let cases = [
    (format!("/api/invoices/{}/open", invoice_id), StatusCode::BAD_REQUEST),
    (
      format!("/api/invoices/{}/open?template=..%2Fsecret.html", invoice_id),
      StatusCode::BAD_REQUEST,
    ),
    (
      format!("/api/invoices/{}/open?template=missing.html", invoice_id),
      StatusCode::NOT_FOUND,
    ),
    (
      "/api/invoices/999/open?template=default.html".to_string(),
      StatusCode::NOT_FOUND,
    ),
    (
      "/api/invoices/abc/open?template=default.html".to_string(),
      StatusCode::BAD_REQUEST,
    ),
  ];
  for (uri, expected) in cases {
    let req = TestRequest::get()
      .uri(&uri)
      .insert_header(ctx.auth())
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), expected, "GET {}", uri);
  }
}

#[actix_web::test]
async fn test_responses_carry_request_id() {
  let ctx = TestContext::new().await;
  let app = init_app!(ctx);

  let resp = test::call_service(&app, TestRequest::get().uri("/api/products").to_request()).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  assert!(resp.headers().contains_key("x-request-id"));
}
