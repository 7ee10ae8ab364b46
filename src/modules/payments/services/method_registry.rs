use std::collections::HashMap;
use std::sync::Arc;

use crate::core::{AppError, Result};

use super::payment_method::{PaymentMethod, PaymentMethodType, RecurringPaymentType};

/// Resolves registered payment methods by system name
pub struct PaymentMethodRegistry {
    methods: HashMap<String, Arc<dyn PaymentMethod>>,
}

impl PaymentMethodRegistry {
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
        }
    }

    /// Register a payment method under its system name
    pub fn register_method(&mut self, method: Arc<dyn PaymentMethod>) {
        let name = method.name().to_string();
        self.methods.insert(name, method);
    }

    /// Get a payment method by system name
    pub fn get_method(&self, name: &str) -> Result<Arc<dyn PaymentMethod>> {
        self.methods
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Payment method '{}' not found", name)))
    }

    /// List capability descriptors of all registered methods, sorted by name
    pub fn list_methods(&self) -> Vec<MethodDescriptor> {
        let mut descriptors: Vec<MethodDescriptor> = self
            .methods
            .values()
            .map(|method| MethodDescriptor::from_method(method.as_ref()))
            .collect();
        descriptors.sort_by(|a, b| a.system_name.cmp(&b.system_name));
        descriptors
    }
}

impl Default for PaymentMethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability surface of a payment method as reported to callers
#[derive(Debug, Clone, serde::Serialize)]
pub struct MethodDescriptor {
    pub system_name: String,
    pub payment_method_type: PaymentMethodType,
    pub recurring_payment_type: RecurringPaymentType,
    pub supports_capture: bool,
    pub supports_refund: bool,
    pub supports_partial_refund: bool,
    pub supports_void: bool,
    pub skip_payment_info: bool,
    pub hidden: bool,
    pub configuration_page_url: String,

    /// Filled from locale resources on single-method lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MethodDescriptor {
    pub fn from_method(method: &dyn PaymentMethod) -> Self {
        Self {
            system_name: method.name().to_string(),
            payment_method_type: method.payment_method_type(),
            recurring_payment_type: method.recurring_payment_type(),
            supports_capture: method.supports_capture(),
            supports_refund: method.supports_refund(),
            supports_partial_refund: method.supports_partial_refund(),
            supports_void: method.supports_void(),
            skip_payment_info: method.skip_payment_info(),
            hidden: method.hide_payment_method(),
            configuration_page_url: method.configuration_page_url(),
            description: None,
        }
    }
}
