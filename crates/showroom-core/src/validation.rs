//! # Validation Module
//!
//! Turns raw form submissions into validated domain input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard form (TypeScript)                                  │
//! │  └── Immediate feedback, not trusted                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Every field checked, every failure collected                      │
//! │  └── Output: ValidatedSale with typed money/dates                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE username                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use showroom_core::validation::{validate_sale, SaleSubmission};
//!
//! let now = Utc.with_ymd_and_hms(2025, 3, 31, 12, 0, 0).unwrap();
//! let submission = SaleSubmission {
//!     vehicle_year: Some("abc".into()),
//!     ..SaleSubmission::default()
//! };
//!
//! let errors = validate_sale(&submission, now).unwrap_err();
//! assert!(errors.has_field("vehicleYear"));
//! assert!(errors.has_field("customerName"));
//! ```

use std::borrow::Cow;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError, ValidationErrors};
use crate::money::{Money, MAX_AMOUNT};
use crate::types::{start_of_day, NewSalesperson, Role, SaleType, Salesperson, Units};
use crate::{MAX_ADMINS, MAX_COLLABORATORS, MIN_VEHICLE_YEAR, VEHICLE_YEAR_LOOKAHEAD};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationErrors>;

const MAX_STOCK_NUMBER_LEN: usize = 50;
const MAX_NAME_LEN: usize = 100;
const MAX_CUSTOMER_NAME_LEN: usize = 200;
const MAX_USERNAME_LEN: usize = 50;

// =============================================================================
// Raw Submission
// =============================================================================

/// A form field as the dashboard sends it: text input or a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum FormValue {
    Number(f64),
    Text(String),
}

impl FormValue {
    /// The value as text; numbers print without exponent notation.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            FormValue::Number(n) => Cow::Owned(n.to_string()),
            FormValue::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        FormValue::Number(value)
    }
}

impl From<i32> for FormValue {
    fn from(value: i32) -> Self {
        FormValue::Number(f64::from(value))
    }
}

/// The "Log Sale" form payload, unvalidated.
///
/// Missing keys and `null` both read as an empty field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct SaleSubmission {
    pub salesperson_id: Option<FormValue>,
    pub stock_number: Option<FormValue>,
    pub vehicle_year: Option<FormValue>,
    pub vehicle_make: Option<FormValue>,
    pub vehicle_model: Option<FormValue>,
    pub sale_type: Option<FormValue>,
    pub sale_date: Option<FormValue>,
    pub sale_price: Option<FormValue>,
    pub cost_price: Option<FormValue>,
    pub front_profit: Option<FormValue>,
    pub back_profit: Option<FormValue>,
    pub customer_name: Option<FormValue>,
}

// =============================================================================
// Validated Sale
// =============================================================================

/// A sale that passed every field rule and is ready for the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSale {
    pub salesperson_id: String,
    pub stock_number: String,
    pub vehicle_year: i32,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub sale_type: SaleType,
    pub sale_date: DateTime<Utc>,
    pub sale_price: Money,
    pub cost_price: Money,
    pub front_profit: Money,
    pub back_profit: Money,
    pub customer_name: String,
}

impl ValidatedSale {
    /// Front plus back gross; the commission base.
    #[inline]
    pub fn gross_profit(&self) -> Money {
        self.front_profit + self.back_profit
    }

    #[inline]
    pub fn units(&self) -> Units {
        self.sale_type.units()
    }

    /// Sold below cost. Allowed, only worth a warning.
    #[inline]
    pub fn is_loss_sale(&self) -> bool {
        self.sale_price < self.cost_price
    }
}

// =============================================================================
// Sale Validation
// =============================================================================

/// Validates a sale submission against the submission instant `now`.
///
/// ## Rules
/// - `salespersonId`, `stockNumber`, `vehicleMake`, `vehicleModel`,
///   `customerName`: required, trimmed
/// - `salePrice`, `costPrice`: decimal, not negative, at most $1,000,000,000
/// - `frontProfit`, `backProfit`: decimal, may be negative, same magnitude cap
/// - Amounts are rounded to the cent
/// - `vehicleYear`: whole number in [1980, year(now) + 2]; `2023.0` counts
/// - `saleType`: FULL or HALF
/// - `saleDate`: RFC 3339 or YYYY-MM-DD, not after `now`
///
/// Every failing field is reported, not just the first.
pub fn validate_sale(submission: &SaleSubmission, now: DateTime<Utc>) -> ValidationResult<ValidatedSale> {
    let mut errors = Vec::new();

    let salesperson_id = required_text(&submission.salesperson_id, "salespersonId", MAX_NAME_LEN, &mut errors);
    let stock_number = required_text(&submission.stock_number, "stockNumber", MAX_STOCK_NUMBER_LEN, &mut errors);
    let vehicle_year = vehicle_year(&submission.vehicle_year, now, &mut errors);
    let vehicle_make = required_text(&submission.vehicle_make, "vehicleMake", MAX_NAME_LEN, &mut errors);
    let vehicle_model = required_text(&submission.vehicle_model, "vehicleModel", MAX_NAME_LEN, &mut errors);
    let sale_type = sale_type(&submission.sale_type, &mut errors);
    let sale_date = sale_date(&submission.sale_date, now, &mut errors);
    let sale_price = money(&submission.sale_price, "salePrice", false, &mut errors);
    let cost_price = money(&submission.cost_price, "costPrice", false, &mut errors);
    let front_profit = money(&submission.front_profit, "frontProfit", true, &mut errors);
    let back_profit = money(&submission.back_profit, "backProfit", true, &mut errors);
    let customer_name = required_text(&submission.customer_name, "customerName", MAX_CUSTOMER_NAME_LEN, &mut errors);

    ValidationErrors::into_result(errors)?;

    Ok(ValidatedSale {
        salesperson_id,
        stock_number,
        vehicle_year,
        vehicle_make,
        vehicle_model,
        sale_type,
        sale_date,
        sale_price,
        cost_price,
        front_profit,
        back_profit,
        customer_name,
    })
}

fn field_text(value: &Option<FormValue>) -> Cow<'_, str> {
    match value {
        Some(v) => v.to_text(),
        None => Cow::Borrowed(""),
    }
}

fn required_text(value: &Option<FormValue>, field: &str, max: usize, errors: &mut Vec<ValidationError>) -> String {
    let text = field_text(value);
    let text = text.trim();

    if text.is_empty() {
        errors.push(ValidationError::Required {
            field: field.to_string(),
        });
    } else if text.chars().count() > max {
        errors.push(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    text.to_string()
}

fn money(value: &Option<FormValue>, field: &str, allow_negative: bool, errors: &mut Vec<ValidationError>) -> Money {
    let text = field_text(value);
    if text.trim().is_empty() {
        errors.push(ValidationError::Required {
            field: field.to_string(),
        });
        return Money::zero();
    }

    match Money::parse_decimal(&text) {
        Some(amount) if amount.is_negative() && !allow_negative => {
            errors.push(ValidationError::MustBeNonNegative {
                field: field.to_string(),
            });
            amount
        }
        Some(amount) if amount > MAX_AMOUNT || amount < -MAX_AMOUNT => {
            errors.push(ValidationError::OutOfRange {
                field: field.to_string(),
                min: if allow_negative { -MAX_AMOUNT.dollars() } else { 0 },
                max: MAX_AMOUNT.dollars(),
            });
            Money::zero()
        }
        Some(amount) => amount,
        None => {
            errors.push(ValidationError::InvalidFormat {
                field: field.to_string(),
                reason: "must be a number".to_string(),
            });
            Money::zero()
        }
    }
}

fn vehicle_year(value: &Option<FormValue>, now: DateTime<Utc>, errors: &mut Vec<ValidationError>) -> i32 {
    const FIELD: &str = "vehicleYear";

    let text = field_text(value);
    let text = text.trim();
    if text.is_empty() {
        errors.push(ValidationError::Required {
            field: FIELD.to_string(),
        });
        return 0;
    }

    let year = match text.parse::<i32>().ok().or_else(|| whole_number(text)) {
        Some(year) => year,
        None => {
            errors.push(ValidationError::InvalidFormat {
                field: FIELD.to_string(),
                reason: "must be a whole number".to_string(),
            });
            return 0;
        }
    };

    let max = now.year() + VEHICLE_YEAR_LOOKAHEAD;
    if !(MIN_VEHICLE_YEAR..=max).contains(&year) {
        errors.push(ValidationError::OutOfRange {
            field: FIELD.to_string(),
            min: i64::from(MIN_VEHICLE_YEAR),
            max: i64::from(max),
        });
    }

    year
}

/// Reads "2023.0" style input as an integer; fractions and non-finite values are rejected.
fn whole_number(text: &str) -> Option<i32> {
    let value: f64 = text.parse().ok()?;
    let in_range = value.is_finite() && value.fract() == 0.0 && value.abs() <= f64::from(i32::MAX);
    in_range.then_some(value as i32)
}

fn sale_type(value: &Option<FormValue>, errors: &mut Vec<ValidationError>) -> SaleType {
    let text = field_text(value);
    if text.trim().is_empty() {
        errors.push(ValidationError::Required {
            field: "saleType".to_string(),
        });
        return SaleType::Full;
    }

    text.parse().unwrap_or_else(|err| {
        errors.push(err);
        SaleType::Full
    })
}

fn sale_date(value: &Option<FormValue>, now: DateTime<Utc>, errors: &mut Vec<ValidationError>) -> DateTime<Utc> {
    const FIELD: &str = "saleDate";

    let text = field_text(value);
    let text = text.trim();
    if text.is_empty() {
        errors.push(ValidationError::Required {
            field: FIELD.to_string(),
        });
        return now;
    }

    let parsed = DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().map(start_of_day));

    match parsed {
        Some(date) if date > now => {
            errors.push(ValidationError::InFuture {
                field: FIELD.to_string(),
            });
            date
        }
        Some(date) => date,
        None => {
            errors.push(ValidationError::InvalidFormat {
                field: FIELD.to_string(),
                reason: "expected an RFC 3339 timestamp or YYYY-MM-DD".to_string(),
            });
            now
        }
    }
}

// =============================================================================
// Team Rules
// =============================================================================

/// Validates a new team member and returns it with fields trimmed.
///
/// ## Rules
/// - `fullName`: required, at most 100 characters
/// - `username`: required, at most 50 characters, letters/digits/`.`/`_`/`-`
/// - `email`: required, `local@domain.tld` shape
pub fn validate_new_salesperson(input: &NewSalesperson) -> ValidationResult<NewSalesperson> {
    let mut errors = Vec::new();

    let full_name = input.full_name.trim();
    if full_name.is_empty() {
        errors.push(ValidationError::Required {
            field: "fullName".to_string(),
        });
    } else if full_name.chars().count() > MAX_NAME_LEN {
        errors.push(ValidationError::TooLong {
            field: "fullName".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    let username = input.username.trim();
    if username.is_empty() {
        errors.push(ValidationError::Required {
            field: "username".to_string(),
        });
    } else if username.len() > MAX_USERNAME_LEN {
        errors.push(ValidationError::TooLong {
            field: "username".to_string(),
            max: MAX_USERNAME_LEN,
        });
    } else if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        errors.push(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must contain only letters, numbers, dots, hyphens, and underscores".to_string(),
        });
    }

    let email = input.email.trim();
    if email.is_empty() {
        errors.push(ValidationError::Required {
            field: "email".to_string(),
        });
    } else if !looks_like_email(email) {
        errors.push(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    ValidationErrors::into_result(errors)?;

    Ok(NewSalesperson {
        full_name: full_name.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        role: input.role,
    })
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
                && domain
                    .split_once('.')
                    .map_or(false, |(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Checks the hard team cap (1 admin, 3 collaborators) before adding `role`.
pub fn check_team_capacity(team: &[Salesperson], role: Role) -> CoreResult<()> {
    let max = match role {
        Role::Admin => MAX_ADMINS,
        Role::Collaborator => MAX_COLLABORATORS,
    };

    let current = team.iter().filter(|member| member.role == role).count();
    if current >= max {
        return Err(CoreError::TeamFull { role, max });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 31, 18, 0, 0).unwrap()
    }

    fn valid_submission() -> SaleSubmission {
        SaleSubmission {
            salesperson_id: Some("sp-1".into()),
            stock_number: Some("A1234".into()),
            vehicle_year: Some(2023.into()),
            vehicle_make: Some("Toyota".into()),
            vehicle_model: Some("Camry".into()),
            sale_type: Some("FULL".into()),
            sale_date: Some("2025-03-14".into()),
            sale_price: Some("28500".into()),
            cost_price: Some(26000.0.into()),
            front_profit: Some("1000".into()),
            back_profit: Some("500.00".into()),
            customer_name: Some("  Jordan Lee ".into()),
        }
    }

    fn member(role: Role) -> Salesperson {
        Salesperson {
            id: "id".to_string(),
            full_name: "Name".to_string(),
            username: "name".to_string(),
            email: "name@example.com".to_string(),
            role,
            created_at: now(),
        }
    }

    #[test]
    fn test_valid_submission() {
        let sale = validate_sale(&valid_submission(), now()).unwrap();

        assert_eq!(sale.salesperson_id, "sp-1");
        assert_eq!(sale.vehicle_year, 2023);
        assert_eq!(sale.sale_type, SaleType::Full);
        assert_eq!(sale.sale_date, Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap());
        assert_eq!(sale.sale_price.cents(), 2_850_000);
        assert_eq!(sale.cost_price.cents(), 2_600_000);
        assert_eq!(sale.gross_profit().cents(), 150_000);
        assert_eq!(sale.customer_name, "Jordan Lee");
        assert!(!sale.is_loss_sale());
    }

    #[test]
    fn test_rfc3339_sale_date() {
        let mut submission = valid_submission();
        submission.sale_date = Some("2025-03-14T16:30:00-05:00".into());

        let sale = validate_sale(&submission, now()).unwrap();
        assert_eq!(sale.sale_date, Utc.with_ymd_and_hms(2025, 3, 14, 21, 30, 0).unwrap());
    }

    #[test]
    fn test_non_numeric_vehicle_year() {
        let mut submission = valid_submission();
        submission.vehicle_year = Some("abc".into());

        let errors = validate_sale(&submission, now()).unwrap_err();
        assert_eq!(errors.fields(), vec!["vehicleYear"]);
    }

    #[test]
    fn test_vehicle_year_range() {
        let mut submission = valid_submission();

        submission.vehicle_year = Some(1979.into());
        assert!(validate_sale(&submission, now()).unwrap_err().has_field("vehicleYear"));

        submission.vehicle_year = Some(2027.into());
        assert!(validate_sale(&submission, now()).is_ok());

        submission.vehicle_year = Some(2028.into());
        assert!(validate_sale(&submission, now()).unwrap_err().has_field("vehicleYear"));

        submission.vehicle_year = Some(2020.5.into());
        assert!(validate_sale(&submission, now()).unwrap_err().has_field("vehicleYear"));

        submission.vehicle_year = Some("2023.0".into());
        assert_eq!(validate_sale(&submission, now()).unwrap().vehicle_year, 2023);
    }

    #[test]
    fn test_oversized_amounts_rejected() {
        let mut submission = valid_submission();
        submission.front_profit = Some("90000000000000000".into());
        submission.back_profit = Some("90000000000000000".into());
        submission.sale_price = Some("1000000000.01".into());

        let errors = validate_sale(&submission, now()).unwrap_err();
        assert_eq!(errors.fields(), vec!["salePrice", "frontProfit", "backProfit"]);
        assert!(errors.iter().all(|e| matches!(e, ValidationError::OutOfRange { .. })));

        submission.sale_price = Some("1000000000".into());
        submission.front_profit = Some("-1000000000".into());
        submission.back_profit = Some("1000000000".into());
        let sale = validate_sale(&submission, now()).unwrap();
        assert_eq!(sale.gross_profit(), Money::zero());
    }

    #[test]
    fn test_amounts_round_to_the_cent() {
        let mut submission = valid_submission();
        submission.front_profit = Some("1000.125".into());
        submission.back_profit = Some((0.1 + 0.2).into());

        let sale = validate_sale(&submission, now()).unwrap();
        assert_eq!(sale.front_profit.cents(), 100_013);
        assert_eq!(sale.back_profit.cents(), 30);
    }

    #[test]
    fn test_every_failing_field_reported() {
        let submission = SaleSubmission {
            sale_type: Some("LEASE".into()),
            sale_price: Some("-5".into()),
            front_profit: Some("lots".into()),
            sale_date: Some("2099-01-01".into()),
            ..SaleSubmission::default()
        };

        let errors = validate_sale(&submission, now()).unwrap_err();
        for field in [
            "salespersonId",
            "stockNumber",
            "vehicleYear",
            "vehicleMake",
            "vehicleModel",
            "saleType",
            "saleDate",
            "salePrice",
            "costPrice",
            "frontProfit",
            "backProfit",
            "customerName",
        ] {
            assert!(errors.has_field(field), "missing error for {}", field);
        }
        assert_eq!(errors.len(), 12);
    }

    #[test]
    fn test_negative_profit_allowed_loss_sale_flagged() {
        let mut submission = valid_submission();
        submission.front_profit = Some("-750.25".into());
        submission.sale_price = Some("25000".into());

        let sale = validate_sale(&submission, now()).unwrap();
        assert_eq!(sale.front_profit.cents(), -75_025);
        assert!(sale.is_loss_sale());
    }

    #[test]
    fn test_sale_date_later_today_is_future() {
        let mut submission = valid_submission();
        submission.sale_date = Some("2025-03-31T18:00:01Z".into());
        assert!(validate_sale(&submission, now()).unwrap_err().has_field("saleDate"));

        submission.sale_date = Some("2025-03-31".into());
        assert!(validate_sale(&submission, now()).is_ok());
    }

    #[test]
    fn test_submission_from_json() {
        let json = r#"{
            "salespersonId": "sp-1",
            "stockNumber": "A1234",
            "vehicleYear": "2023",
            "vehicleMake": "Toyota",
            "vehicleModel": "Camry",
            "saleType": "half",
            "saleDate": "2025-03-14",
            "salePrice": 28500,
            "costPrice": "26000",
            "frontProfit": 1000.5,
            "backProfit": null,
            "customerName": "Jordan Lee"
        }"#;

        let submission: SaleSubmission = serde_json::from_str(json).unwrap();
        let errors = validate_sale(&submission, now()).unwrap_err();
        assert_eq!(errors.fields(), vec!["backProfit"]);

        let mut submission = submission;
        submission.back_profit = Some(0.into());
        let sale = validate_sale(&submission, now()).unwrap();
        assert_eq!(sale.sale_type, SaleType::Half);
        assert_eq!(sale.front_profit.cents(), 100_050);
    }

    #[test]
    fn test_validate_new_salesperson() {
        let input = NewSalesperson {
            full_name: " Casey Morgan ".to_string(),
            username: "casey.m".to_string(),
            email: "casey@dealer.com".to_string(),
            role: Role::Collaborator,
        };
        let clean = validate_new_salesperson(&input).unwrap();
        assert_eq!(clean.full_name, "Casey Morgan");

        let bad = NewSalesperson {
            full_name: "".to_string(),
            username: "has space".to_string(),
            email: "not-an-email".to_string(),
            role: Role::Collaborator,
        };
        let errors = validate_new_salesperson(&bad).unwrap_err();
        assert_eq!(errors.fields(), vec!["fullName", "username", "email"]);
    }

    #[test]
    fn test_team_capacity() {
        let mut team = vec![member(Role::Admin)];
        assert!(matches!(
            check_team_capacity(&team, Role::Admin),
            Err(CoreError::TeamFull { max: 1, .. })
        ));

        for _ in 0..3 {
            assert!(check_team_capacity(&team, Role::Collaborator).is_ok());
            team.push(member(Role::Collaborator));
        }
        assert!(matches!(
            check_team_capacity(&team, Role::Collaborator),
            Err(CoreError::TeamFull { max: 3, .. })
        ));
    }
}
