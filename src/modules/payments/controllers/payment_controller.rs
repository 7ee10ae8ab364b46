use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::error::AppError;
use crate::modules::payments::models::{
    CancelRecurringPaymentRequest, CapturePaymentRequest, PaymentForm, ProcessPaymentApiRequest,
    ProcessPaymentRequest, RefundPaymentRequest, VoidPaymentRequest,
};
use crate::modules::payments::services::method_registry::{
    MethodDescriptor, PaymentMethodRegistry,
};

/// Registered payment methods with their capability surface
/// GET /api/payments
pub async fn list_methods(
    registry: web::Data<Arc<PaymentMethodRegistry>>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(registry.list_methods()))
}

/// Descriptor of one payment method, including its storefront description
/// GET /api/payments/{method}
pub async fn get_method_descriptor(
    registry: web::Data<Arc<PaymentMethodRegistry>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let method = registry.get_method(&path.into_inner())?;

    let mut descriptor = MethodDescriptor::from_method(method.as_ref());
    descriptor.description = Some(method.payment_method_description().await?);

    Ok(HttpResponse::Ok().json(descriptor))
}

/// Expiry choices offered by the card entry form
#[derive(Debug, Serialize)]
pub struct PaymentFormMetadata {
    pub months: Vec<String>,
    pub years: Vec<String>,
}

/// Card expiry months and the 15-year expiry window
/// GET /api/payments/{method}/form
pub async fn form_metadata(
    registry: web::Data<Arc<PaymentMethodRegistry>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    // Unknown methods get a 404; the metadata itself is method-independent
    registry.get_method(&path.into_inner())?;

    let current_year = chrono::Utc::now().year();
    let months = (1..=12).map(|month| format!("{:02}", month)).collect();
    let years = (0..15).map(|i| (current_year + i).to_string()).collect();

    Ok(HttpResponse::Ok().json(PaymentFormMetadata { months, years }))
}

/// Validate a payment form without processing anything
/// POST /api/payments/{method}/form/validate
pub async fn validate_form(
    registry: web::Data<Arc<PaymentMethodRegistry>>,
    path: web::Path<String>,
    form: web::Json<PaymentForm>,
) -> Result<HttpResponse, AppError> {
    let method = registry.get_method(&path.into_inner())?;
    let warnings = method.validate_payment_form(&form);

    Ok(HttpResponse::Ok().json(serde_json::json!({ "warnings": warnings })))
}

#[derive(Debug, Deserialize)]
pub struct HandlingFeeRequest {
    #[serde(default)]
    pub store_id: i64,
    pub cart_total: Decimal,
}

/// Additional handling fee for a cart total
/// POST /api/payments/{method}/fee
pub async fn handling_fee(
    registry: web::Data<Arc<PaymentMethodRegistry>>,
    path: web::Path<String>,
    request: web::Json<HandlingFeeRequest>,
) -> Result<HttpResponse, AppError> {
    let method = registry.get_method(&path.into_inner())?;
    let request = request.into_inner();

    let additional_fee = method
        .additional_handling_fee(request.store_id, request.cart_total)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "additional_fee": additional_fee })))
}

/// Validate the form, extract card data and process the payment
///
/// Form warnings reject the request with 400 before any gateway traffic.
/// Gateway declines are not HTTP failures: the result body carries them in
/// `errors` with a 200 status.
/// POST /api/payments/{method}
pub async fn process_payment(
    registry: web::Data<Arc<PaymentMethodRegistry>>,
    path: web::Path<String>,
    request: web::Json<ProcessPaymentApiRequest>,
) -> Result<HttpResponse, AppError> {
    let method = registry.get_method(&path.into_inner())?;
    let request = request.into_inner();

    let warnings = method.validate_payment_form(&request.form);
    if !warnings.is_empty() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({ "warnings": warnings })));
    }

    let credit_card = method.get_payment_info(&request.form)?;
    let result = method
        .process_payment(ProcessPaymentRequest::from_api(request, credit_card))
        .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Capture a previously authorized payment
/// POST /api/payments/{method}/capture
pub async fn capture_payment(
    registry: web::Data<Arc<PaymentMethodRegistry>>,
    path: web::Path<String>,
    request: web::Json<CapturePaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let method = registry.get_method(&path.into_inner())?;
    let result = method.capture(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Refund a captured payment
/// POST /api/payments/{method}/refund
pub async fn refund_payment(
    registry: web::Data<Arc<PaymentMethodRegistry>>,
    path: web::Path<String>,
    request: web::Json<RefundPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let method = registry.get_method(&path.into_inner())?;
    let result = method.refund(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Void a pending authorization
/// POST /api/payments/{method}/void
pub async fn void_payment(
    registry: web::Data<Arc<PaymentMethodRegistry>>,
    path: web::Path<String>,
    request: web::Json<VoidPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let method = registry.get_method(&path.into_inner())?;
    let result = method.void(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Charge a recurring installment (not supported by the Cardknox method,
/// which returns the empty result)
/// POST /api/payments/{method}/recurring
pub async fn process_recurring_payment(
    registry: web::Data<Arc<PaymentMethodRegistry>>,
    path: web::Path<String>,
    request: web::Json<ProcessPaymentApiRequest>,
) -> Result<HttpResponse, AppError> {
    let method = registry.get_method(&path.into_inner())?;
    let request = request.into_inner();

    let credit_card = method.get_payment_info(&request.form)?;
    let result = method
        .process_recurring_payment(ProcessPaymentRequest::from_api(request, credit_card))
        .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Cancel a recurring agreement
/// POST /api/payments/{method}/recurring/cancel
pub async fn cancel_recurring_payment(
    registry: web::Data<Arc<PaymentMethodRegistry>>,
    path: web::Path<String>,
    request: web::Json<CancelRecurringPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let method = registry.get_method(&path.into_inner())?;
    let result = method.cancel_recurring_payment(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Configure checkout payment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payments")
            .route("", web::get().to(list_methods))
            .route("/{method}", web::get().to(get_method_descriptor))
            .route("/{method}", web::post().to(process_payment))
            .route("/{method}/form", web::get().to(form_metadata))
            .route("/{method}/form/validate", web::post().to(validate_form))
            .route("/{method}/fee", web::post().to(handling_fee))
            .route("/{method}/capture", web::post().to(capture_payment))
            .route("/{method}/refund", web::post().to(refund_payment))
            .route("/{method}/void", web::post().to(void_payment))
            .route("/{method}/recurring", web::post().to(process_recurring_payment))
            .route(
                "/{method}/recurring/cancel",
                web::post().to(cancel_recurring_payment),
            ),
    );
}
