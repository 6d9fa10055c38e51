//! Checkout: delivery charges, customer validation and order payloads.
//!
//! Orders are cash on delivery and come from one of two places, each with its
//! own form and payload:
//!
//! - The cart checkout page ([`CartOrder`]) asks for first and last name,
//!   phone, a complete address, city and area. Its total is the cart total;
//!   no delivery charge is added.
//! - The "buy now" form on a product page ([`DirectOrder`]) asks for a name,
//!   a local mobile number and an address, alongside the color and power
//!   selection. Delivery is free from two pieces upwards; otherwise it costs
//!   60 taka inside Dhaka and 100 taka outside.
//!
//! Submitting a payload is up to the caller.

use core::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{CartItem, CartState, CartVariant};
use crate::types::ProductId;

/// Quantity from which delivery is free.
pub const FREE_DELIVERY_MIN_QUANTITY: u32 = 2;

/// Delivery charge inside Dhaka, in taka.
pub const INSIDE_DHAKA_CHARGE: i64 = 60;

/// Delivery charge outside Dhaka, in taka.
pub const OUTSIDE_DHAKA_CHARGE: i64 = 100;

/// Payment method recorded on every order.
pub const PAYMENT_METHOD: &str = "COD";

/// `orderType` of a product-page order.
pub const DIRECT_ORDER_TYPE: &str = "direct";

/// City preselected on the cart checkout form.
pub const DEFAULT_CITY: &str = "dhaka";

/// Bangladesh mobile number, optionally prefixed with `88` or `+88`.
static CHECKOUT_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+?88)?01[3-9]\d{8}$").expect("Invalid regex"));

/// Local Bangladesh mobile number, no country prefix.
static DIRECT_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^01[3-9]\d{8}$").expect("Invalid regex"));

/// Where an order is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeliveryLocation {
    #[default]
    #[serde(rename = "Inside Dhaka")]
    InsideDhaka,
    #[serde(rename = "Outside Dhaka")]
    OutsideDhaka,
}

impl DeliveryLocation {
    /// Delivery charge before the free-delivery rule.
    #[must_use]
    pub fn base_charge(self) -> Decimal {
        match self {
            Self::InsideDhaka => Decimal::from(INSIDE_DHAKA_CHARGE),
            Self::OutsideDhaka => Decimal::from(OUTSIDE_DHAKA_CHARGE),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InsideDhaka => "Inside Dhaka",
            Self::OutsideDhaka => "Outside Dhaka",
        }
    }
}

impl fmt::Display for DeliveryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DeliveryLocation {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inside" | "inside dhaka" => Ok(Self::InsideDhaka),
            "outside" | "outside dhaka" => Ok(Self::OutsideDhaka),
            _ => Err(CheckoutError::UnknownLocation(s.to_owned())),
        }
    }
}

/// Delivery charge for a direct order of `quantity` pieces.
#[must_use]
pub fn delivery_charge(quantity: u32, location: DeliveryLocation) -> Decimal {
    if quantity >= FREE_DELIVERY_MIN_QUANTITY {
        Decimal::ZERO
    } else {
        location.base_charge()
    }
}

/// Money breakdown shown before placing an order.
///
/// Arithmetic saturates at the `Decimal` bounds instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub delivery_charge: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl OrderSummary {
    /// Summary for a single product bought from its page.
    #[must_use]
    pub fn for_direct(price: Decimal, quantity: u32, location: DeliveryLocation) -> Self {
        let subtotal = price.saturating_mul(Decimal::from(quantity));
        let delivery_charge = delivery_charge(quantity, location);
        Self {
            subtotal,
            delivery_charge,
            total: subtotal.saturating_add(delivery_charge),
        }
    }

    /// Summary for the cart checkout, which carries no delivery charge.
    #[must_use]
    pub fn for_cart(cart: &CartState) -> Self {
        let subtotal = cart.total();
        Self {
            subtotal,
            delivery_charge: Decimal::ZERO,
            total: subtotal,
        }
    }
}

/// An order form field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderField {
    FirstName,
    LastName,
    Name,
    Phone,
    Address,
    City,
    Area,
    Color,
    Power,
    Quantity,
}

/// A validation failure for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: OrderField,
    pub message: &'static str,
}

impl FieldError {
    const fn new(field: OrderField, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Errors that prevent building an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The cart has no items.
    #[error("cart is empty")]
    EmptyCart,
    /// One or more form fields are invalid.
    #[error("invalid order details: {}", describe(.0))]
    InvalidFields(Vec<FieldError>),
    /// The delivery location is not recognised.
    #[error("unknown delivery location: {0} (expected inside or outside)")]
    UnknownLocation(String),
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message)
        .collect::<Vec<_>>()
        .join("; ")
}

fn into_result(errors: Vec<FieldError>) -> Result<(), CheckoutError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CheckoutError::InvalidFields(errors))
    }
}

fn without_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Check a required text field with a minimum trimmed length.
fn check_min_len(
    errors: &mut Vec<FieldError>,
    field: OrderField,
    value: &str,
    min: usize,
    messages: (&'static str, &'static str),
) {
    let value = value.trim();
    if value.is_empty() {
        errors.push(FieldError::new(field, messages.0));
    } else if value.chars().count() < min {
        errors.push(FieldError::new(field, messages.1));
    }
}

/// Shipping details entered on the cart checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutCustomer {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub area: String,
}

impl Default for CheckoutCustomer {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            address: String::new(),
            city: DEFAULT_CITY.to_owned(),
            area: String::new(),
        }
    }
}

impl CheckoutCustomer {
    /// Minimum trimmed length of each name part.
    pub const MIN_NAME_LEN: usize = 2;
    /// Minimum trimmed address length.
    pub const MIN_ADDRESS_LEN: usize = 10;

    /// Check every field and collect all failures, in form order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidFields`] listing each invalid field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let mut errors = Vec::new();

        check_min_len(
            &mut errors,
            OrderField::FirstName,
            &self.first_name,
            Self::MIN_NAME_LEN,
            ("First name is required", "First name must be at least 2 characters"),
        );
        check_min_len(
            &mut errors,
            OrderField::LastName,
            &self.last_name,
            Self::MIN_NAME_LEN,
            ("Last name is required", "Last name must be at least 2 characters"),
        );

        if self.phone.trim().is_empty() {
            errors.push(FieldError::new(OrderField::Phone, "Phone number is required"));
        } else if !CHECKOUT_PHONE_RE.is_match(&without_whitespace(&self.phone)) {
            errors.push(FieldError::new(
                OrderField::Phone,
                "Enter a valid Bangladesh phone number (e.g., 01712345678)",
            ));
        }

        check_min_len(
            &mut errors,
            OrderField::Address,
            &self.address,
            Self::MIN_ADDRESS_LEN,
            ("Address is required", "Please enter a complete address"),
        );

        if self.city.is_empty() {
            errors.push(FieldError::new(OrderField::City, "City is required"));
        }
        if self.area.trim().is_empty() {
            errors.push(FieldError::new(OrderField::Area, "Area/Thana is required"));
        }

        into_result(errors)
    }

    /// First and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Contact details entered on the product-page order form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectCustomer {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl DirectCustomer {
    fn check(&self, errors: &mut Vec<FieldError>) {
        if self.name.trim().is_empty() {
            errors.push(FieldError::new(OrderField::Name, "Name is required"));
        }

        if self.phone.trim().is_empty() {
            errors.push(FieldError::new(OrderField::Phone, "Phone number is required"));
        } else if !DIRECT_PHONE_RE.is_match(&without_whitespace(&self.phone)) {
            errors.push(FieldError::new(
                OrderField::Phone,
                "Invalid Bangladesh phone number",
            ));
        }

        if self.address.trim().is_empty() {
            errors.push(FieldError::new(OrderField::Address, "Address is required"));
        }
    }

    /// Check every field and collect all failures.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidFields`] listing each invalid field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let mut errors = Vec::new();
        self.check(&mut errors);
        into_result(errors)
    }
}

/// Customer block of an order payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderCustomer {
    pub name: String,
    pub phone: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

impl From<CheckoutCustomer> for OrderCustomer {
    fn from(customer: CheckoutCustomer) -> Self {
        Self {
            name: customer.full_name(),
            phone: customer.phone,
            address: customer.address,
            city: Some(customer.city),
            area: Some(customer.area),
        }
    }
}

impl From<DirectCustomer> for OrderCustomer {
    fn from(customer: DirectCustomer) -> Self {
        Self {
            name: customer.name,
            phone: customer.phone,
            address: customer.address,
            city: None,
            area: None,
        }
    }
}

/// An ordered line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<CartVariant>,
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
            variant: item.variant.clone(),
        }
    }
}

/// The order payload of the cart checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartOrder {
    pub customer: OrderCustomer,
    pub items: Vec<OrderItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub payment_method: &'static str,
    pub created_at: DateTime<Utc>,
}

impl CartOrder {
    /// Build an order for everything in the cart, stamped `created_at`.
    ///
    /// The form is checked before the cart, so an invalid form on an empty
    /// cart reports the form errors.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidFields`] if the shipping details fail
    /// validation, or [`CheckoutError::EmptyCart`] for an empty cart.
    pub fn new(
        cart: &CartState,
        customer: CheckoutCustomer,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CheckoutError> {
        customer.validate()?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(Self {
            customer: customer.into(),
            items: cart.items().iter().map(OrderItem::from).collect(),
            total: cart.total(),
            payment_method: PAYMENT_METHOD,
            created_at,
        })
    }
}

/// The order payload of the product-page "buy now" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectOrder {
    pub order_type: &'static str,
    pub customer: OrderCustomer,
    pub delivery_location: DeliveryLocation,
    pub items: Vec<OrderItem>,
    #[serde(flatten)]
    pub summary: OrderSummary,
    pub payment_method: &'static str,
}

impl DirectOrder {
    /// Build an order for one product line, leaving the cart alone.
    ///
    /// The line must carry a color and a power. Selection and customer
    /// failures are reported together.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidFields`] if the selection or the
    /// customer details fail validation.
    pub fn new(
        item: &CartItem,
        customer: DirectCustomer,
        location: DeliveryLocation,
    ) -> Result<Self, CheckoutError> {
        let mut errors = Vec::new();
        check_selection(item, &mut errors);
        customer.check(&mut errors);
        into_result(errors)?;

        Ok(Self {
            order_type: DIRECT_ORDER_TYPE,
            customer: customer.into(),
            delivery_location: location,
            items: vec![OrderItem::from(item)],
            summary: OrderSummary::for_direct(item.price, item.quantity, location),
            payment_method: PAYMENT_METHOD,
        })
    }
}

fn check_selection(item: &CartItem, errors: &mut Vec<FieldError>) {
    let variant = item.variant.as_ref();
    let selected = |value: Option<&String>| value.is_some_and(|v| !v.trim().is_empty());

    if !selected(variant.and_then(|v| v.color.as_ref())) {
        errors.push(FieldError::new(OrderField::Color, "Display color is required"));
    }
    if !selected(variant.and_then(|v| v.power.as_ref())) {
        errors.push(FieldError::new(OrderField::Power, "Lens power is required"));
    }
    if item.quantity == 0 {
        errors.push(FieldError::new(OrderField::Quantity, "Quantity must be at least 1"));
    }
}
