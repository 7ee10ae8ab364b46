/// Unit tests for gateway response to payment result mapping
///
/// Covers the field assignments on accepted responses for both transact
/// modes and the order-level error strings produced for each outcome class
/// of process, capture, refund and void.
use payknox::modules::cardknox::{GatewayResponse, ResponseType};
use payknox::modules::payments::models::PaymentStatus;
use payknox::modules::payments::services::processor::{
    map_capture_response, map_process_response, map_refund_response, map_void_response,
};
use payknox::modules::settings::models::TransactMode;

fn gateway_response(response_type: ResponseType) -> GatewayResponse {
    GatewayResponse {
        response_type,
        reference_number: Some("23110501".to_string()),
        auth_code: Some("000123".to_string()),
        error_code: Some("00015".to_string()),
        error_message: Some("Invalid card number".to_string()),
    }
}

const ERROR_PAIR: &str = "Error code: 00015 - Error Message: Invalid card number";

#[test]
fn test_accepted_authorize_sets_authorization_fields() {
    let result = map_process_response(
        TransactMode::Authorize,
        &gateway_response(ResponseType::Accepted),
    );

    assert!(result.success());
    assert_eq!(result.new_payment_status, PaymentStatus::Authorized);
    assert_eq!(
        result.authorization_transaction_id.as_deref(),
        Some("23110501")
    );
    assert_eq!(
        result.authorization_transaction_code.as_deref(),
        Some("23110501")
    );
    assert_eq!(
        result.authorization_transaction_result.as_deref(),
        Some("Payment request approved")
    );
    assert!(result.capture_transaction_id.is_none());
}

#[test]
fn test_accepted_sale_sets_capture_fields() {
    let result = map_process_response(
        TransactMode::AuthorizeAndCapture,
        &gateway_response(ResponseType::Accepted),
    );

    assert!(result.success());
    assert_eq!(result.new_payment_status, PaymentStatus::Paid);
    assert_eq!(result.capture_transaction_id.as_deref(), Some("23110501"));
    assert_eq!(
        result.authorization_transaction_result.as_deref(),
        Some("Payment request approved")
    );
    assert!(result.authorization_transaction_id.is_none());
    assert!(result.authorization_transaction_code.is_none());
}

#[test]
fn test_process_error_strings_per_outcome() {
    let cases = [
        (ResponseType::Declined, format!("Payment declined. {}", ERROR_PAIR)),
        (ResponseType::Error, format!("Payment error. {}", ERROR_PAIR)),
        (
            ResponseType::Timeout,
            format!("Payment timeout. Please try again. {}", ERROR_PAIR),
        ),
        (
            ResponseType::HttpException,
            format!("Communication error. Please try again. {}", ERROR_PAIR),
        ),
    ];

    for (response_type, expected) in cases {
        let result =
            map_process_response(TransactMode::Authorize, &gateway_response(response_type));
        assert!(!result.success());
        assert_eq!(result.errors, vec![expected]);
        assert_eq!(
            result.new_payment_status,
            PaymentStatus::Pending,
            "failed payments must keep the pending status"
        );
        assert!(result.authorization_transaction_id.is_none());
        assert!(result.capture_transaction_id.is_none());
    }
}

#[test]
fn test_accepted_capture_marks_order_paid() {
    let result = map_capture_response(&gateway_response(ResponseType::Accepted));

    assert!(result.success());
    assert_eq!(result.new_payment_status, PaymentStatus::Paid);
    assert_eq!(result.capture_transaction_id.as_deref(), Some("23110501"));
    assert_eq!(
        result.capture_transaction_result.as_deref(),
        Some("Payment capture successful")
    );
}

#[test]
fn test_capture_error_strings_per_outcome() {
    let cases = [
        (
            ResponseType::Declined,
            format!("Payment capture declined. {}", ERROR_PAIR),
        ),
        (
            ResponseType::Error,
            format!("Payment capture error. {}", ERROR_PAIR),
        ),
        (
            ResponseType::Timeout,
            format!("Payment capture timeout. Please try again. {}", ERROR_PAIR),
        ),
        (
            ResponseType::HttpException,
            format!("Communication error. Please try again. {}", ERROR_PAIR),
        ),
    ];

    for (response_type, expected) in cases {
        let result = map_capture_response(&gateway_response(response_type));
        assert_eq!(result.errors, vec![expected]);
        assert_eq!(result.new_payment_status, PaymentStatus::Pending);
    }
}

#[test]
fn test_accepted_refund_distinguishes_partial_from_full() {
    let partial = map_refund_response(true, &gateway_response(ResponseType::Accepted));
    assert!(partial.success());
    assert_eq!(partial.new_payment_status, PaymentStatus::PartiallyRefunded);

    let full = map_refund_response(false, &gateway_response(ResponseType::Accepted));
    assert!(full.success());
    assert_eq!(full.new_payment_status, PaymentStatus::Refunded);
}

#[test]
fn test_refund_error_strings_per_outcome() {
    let cases = [
        (
            ResponseType::Declined,
            format!("Payment refund declined. {}", ERROR_PAIR),
        ),
        (
            ResponseType::Error,
            format!("Payment refund error. {}", ERROR_PAIR),
        ),
        (
            ResponseType::Timeout,
            format!("Payment refund timeout. Please try again. {}", ERROR_PAIR),
        ),
        (
            ResponseType::HttpException,
            format!("Communication error. Please try again. {}", ERROR_PAIR),
        ),
    ];

    for (response_type, expected) in cases {
        let result = map_refund_response(false, &gateway_response(response_type));
        assert_eq!(result.errors, vec![expected]);
        assert_eq!(result.new_payment_status, PaymentStatus::Pending);
    }
}

#[test]
fn test_accepted_void_marks_order_voided() {
    let result = map_void_response(&gateway_response(ResponseType::Accepted));
    assert!(result.success());
    assert_eq!(result.new_payment_status, PaymentStatus::Voided);
}

#[test]
fn test_void_error_strings_per_outcome() {
    let cases = [
        (
            ResponseType::Declined,
            format!("Payment void declined. {}", ERROR_PAIR),
        ),
        (
            ResponseType::Error,
            format!("Payment void error. {}", ERROR_PAIR),
        ),
        (
            ResponseType::Timeout,
            format!("Payment void timeout. Please try again. {}", ERROR_PAIR),
        ),
        (
            ResponseType::HttpException,
            format!("Communication error. Please try again. {}", ERROR_PAIR),
        ),
    ];

    for (response_type, expected) in cases {
        let result = map_void_response(&gateway_response(response_type));
        assert_eq!(result.errors, vec![expected]);
        assert_eq!(result.new_payment_status, PaymentStatus::Pending);
    }
}

#[test]
fn test_error_pair_tolerates_missing_fields() {
    let response = GatewayResponse::timeout("request timed out after 30s");
    let result = map_process_response(TransactMode::AuthorizeAndCapture, &response);

    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("Payment timeout. Please try again."));
    assert!(result.errors[0].contains("Error code: timeout"));
    assert!(result.errors[0].contains("request timed out after 30s"));
}
