use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A student admission record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub father_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    /// Alternate lookup key assigned at admission time.
    pub reg_no: String,
    #[serde(default)]
    pub course_python: bool,
    #[serde(default)]
    pub course_iot: bool,
    #[serde(default)]
    pub course_sql: bool,
    #[serde(default)]
    pub course_web: bool,
    #[serde(default)]
    pub total_fee: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub net_fee: f64,
    /// Admission date in YYYY-MM-DD format.
    #[serde(default)]
    pub admission_date: String,
    /// Legacy records carry booleans, "yes"/"no" strings or 0/1 here.
    #[serde(default)]
    pub verified: Value,
    #[serde(default)]
    pub hostel: Value,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub id_proof: Option<String>,
}

impl Student {
    /// Course flags in precedence order, highest first. A student enrolled
    /// in more than one course is shown under the first set flag.
    pub fn course_flags(&self) -> [(bool, &'static str); 4] {
        [
            (self.course_python, "Python"),
            (self.course_iot, "IoT"),
            (self.course_sql, "SQL"),
            (self.course_web, "Web Development"),
        ]
    }

    /// Label of the highest-precedence course flag that is set, or an
    /// empty string when the student has no course flag at all.
    pub fn course_label(&self) -> &'static str {
        for (flag, label) in self.course_flags() {
            if flag {
                return label;
            }
        }
        ""
    }
}

/// Request for creating a new student admission record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub name: String,
    pub father_name: String,
    pub email: String,
    pub mobile: String,
    pub reg_no: String,
    pub course_python: bool,
    pub course_iot: bool,
    pub course_sql: bool,
    pub course_web: bool,
    pub total_fee: f64,
    pub discount: f64,
    pub net_fee: f64,
    pub admission_date: String,
}

/// Request for updating an existing student record. Unset fields are
/// left unchanged by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub father_name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub total_fee: Option<f64>,
    pub discount: Option<f64>,
    pub net_fee: Option<f64>,
    pub verified: Option<bool>,
    pub hostel: Option<bool>,
}

/// A collected fee payment as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub id: String,
    pub student_id: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub reg_no: String,
    pub fee_type: String,
    #[serde(default)]
    pub course: String,
    pub fee_amount: f64,
    #[serde(default)]
    pub discount_amount: f64,
    pub net_amount: f64,
    pub payment_method: String,
    pub transaction_id: String,
    /// Payment date in YYYY-MM-DD format.
    pub payment_date: String,
    #[serde(default)]
    pub remarks: String,
    #[serde(default)]
    pub created_at: String,
}

/// Request for recording a collected fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFeeRequest {
    pub student_id: String,
    pub reg_no: String,
    pub student_name: String,
    pub fee_type: String,
    pub course: String,
    pub fee_amount: f64,
    pub discount_amount: f64,
    pub net_amount: f64,
    pub payment_method: String,
    pub transaction_id: String,
    pub payment_date: String,
    pub remarks: String,
}

/// Request for correcting a stored fee record. Unset fields are left
/// unchanged by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateFeeRequest {
    pub fee_amount: Option<f64>,
    pub discount_amount: Option<f64>,
    pub net_amount: Option<f64>,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub payment_date: Option<String>,
    pub remarks: Option<String>,
}

/// Standard response body shared by every backend endpoint: a success
/// flag plus either a data payload or an error/message field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the data payload, or the extracted failure message.
    pub fn into_result(self) -> Result<T, ApiError> {
        if self.success {
            match self.data {
                Some(data) => Ok(data),
                None => Err(ApiError::Decode("missing data payload".to_string())),
            }
        } else {
            Err(ApiError::Backend(self.failure_message()))
        }
    }

    /// Succeed or fail on the envelope's flag alone, for endpoints whose
    /// payload does not matter to the caller (deletes).
    pub fn into_status(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Backend(self.failure_message()))
        }
    }

    /// Human-readable failure text: the error field when present, the
    /// message field otherwise, a generic fallback when both are blank.
    pub fn failure_message(&self) -> String {
        self.error
            .clone()
            .filter(|text| !text.trim().is_empty())
            .or_else(|| self.message.clone().filter(|text| !text.trim().is_empty()))
            .unwrap_or_else(|| "Something went wrong. Please try again.".to_string())
    }
}

/// Failure of a single backend operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("record not found")]
    NotFound,
    #[error("{0}")]
    Backend(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid server response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

/// Parse a user-entered amount, treating blank or non-numeric input as 0.
pub fn parse_amount(input: &str) -> f64 {
    input.trim().parse::<f64>().unwrap_or(0.0)
}

/// Format an amount the way the fee form displays it: integral values
/// without a decimal point, fractional values with their natural digits.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// The select option that reveals the matching free-text field.
pub const OTHER_OPTION: &str = "Other";

/// Fee type choices offered by the intake form.
pub const FEE_TYPES: &[&str] = &["Admission", "Tuition", "Exam", "Hostel", OTHER_OPTION];

/// Payment method choices offered by the intake form.
pub const PAYMENT_METHODS: &[&str] = &["Cash", "UPI", "Card", "Net Banking", OTHER_OPTION];

/// State of the fee intake form. All user-facing fields are kept as the
/// raw strings the inputs produced; amounts are coerced only at submit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeFormState {
    pub fee_type: String,
    pub fee_type_other: String,
    pub student_identifier: String,
    pub student_name: String,
    pub course: String,
    pub fee_amount: String,
    pub discount_amount: String,
    pub net_amount: String,
    pub payment_method: String,
    pub payment_method_other: String,
    pub transaction_id: String,
    pub payment_date: String,
    pub remarks: String,
    pub fee_type_is_other: bool,
    pub payment_method_is_other: bool,
}

/// A single field edit. Routing every change through one event type keeps
/// the derived net amount in step with the inputs that produce it.
#[derive(Debug, Clone, PartialEq)]
pub enum FeeField {
    FeeType(String),
    FeeTypeOther(String),
    StudentIdentifier(String),
    FeeAmount(String),
    DiscountAmount(String),
    PaymentMethod(String),
    PaymentMethodOther(String),
    TransactionId(String),
    PaymentDate(String),
    Remarks(String),
}

impl FeeFormState {
    /// Apply one field edit. Editing either amount recomputes the net
    /// amount in the same transition, so the displayed net is never stale
    /// relative to the inputs it was derived from.
    pub fn apply(&mut self, field: FeeField) {
        match field {
            FeeField::FeeType(value) => {
                self.fee_type_is_other = value == OTHER_OPTION;
                if !self.fee_type_is_other {
                    self.fee_type_other.clear();
                }
                self.fee_type = value;
            }
            FeeField::FeeTypeOther(value) => self.fee_type_other = value,
            FeeField::StudentIdentifier(value) => self.student_identifier = value,
            FeeField::FeeAmount(value) => {
                self.fee_amount = value;
                self.recompute_net();
            }
            FeeField::DiscountAmount(value) => {
                self.discount_amount = value;
                self.recompute_net();
            }
            FeeField::PaymentMethod(value) => {
                self.payment_method_is_other = value == OTHER_OPTION;
                if !self.payment_method_is_other {
                    self.payment_method_other.clear();
                }
                self.payment_method = value;
            }
            FeeField::PaymentMethodOther(value) => self.payment_method_other = value,
            FeeField::TransactionId(value) => self.transaction_id = value,
            FeeField::PaymentDate(value) => self.payment_date = value,
            FeeField::Remarks(value) => self.remarks = value,
        }
    }

    fn recompute_net(&mut self) {
        let fee = parse_amount(&self.fee_amount);
        let discount = parse_amount(&self.discount_amount);
        self.net_amount = format_amount(fee - discount);
    }

    /// Populate the dependent fields from a resolved student record,
    /// overwriting whatever was entered before.
    pub fn absorb_student(&mut self, student: &Student) {
        self.student_name = student.name.clone();
        self.course = student.course_label().to_string();
        self.fee_amount = format_amount(student.total_fee);
        self.discount_amount = format_amount(student.discount);
        self.net_amount = format_amount(student.net_fee);
    }

    /// The fee type that would be submitted, resolving the "Other" choice
    /// to its free-text value.
    pub fn effective_fee_type(&self) -> &str {
        if self.fee_type_is_other {
            &self.fee_type_other
        } else {
            &self.fee_type
        }
    }

    /// The payment method that would be submitted, resolving the "Other"
    /// choice to its free-text value.
    pub fn effective_payment_method(&self) -> &str {
        if self.payment_method_is_other {
            &self.payment_method_other
        } else {
            &self.payment_method
        }
    }

    /// Check the required fields before submission. Returns the message
    /// for the first problem found; no request may be issued on `Err`.
    pub fn validate(&self) -> Result<(), String> {
        if self.fee_amount.trim().is_empty() {
            return Err("Please enter the fee amount".to_string());
        }
        if self.net_amount.trim().is_empty() {
            return Err("Net amount has not been calculated".to_string());
        }
        if self.payment_method.trim().is_empty() {
            return Err("Please select a payment method".to_string());
        }
        if self.payment_method_is_other && self.payment_method_other.trim().is_empty() {
            return Err("Please describe the payment method".to_string());
        }
        if self.transaction_id.trim().is_empty() {
            return Err("Please enter the transaction id".to_string());
        }
        if self.payment_date.trim().is_empty() {
            return Err("Please select the payment date".to_string());
        }
        if NaiveDate::parse_from_str(self.payment_date.trim(), "%Y-%m-%d").is_err() {
            return Err("Payment date must be in YYYY-MM-DD format".to_string());
        }
        Ok(())
    }

    /// Assemble the create request, coercing amounts to numbers. The
    /// resolved student, when available, supplies the canonical id and
    /// registration number; otherwise the raw identifier is passed on.
    pub fn to_create_request(&self, student: Option<&Student>) -> CreateFeeRequest {
        CreateFeeRequest {
            student_id: student
                .map(|s| s.id.clone())
                .unwrap_or_else(|| self.student_identifier.trim().to_string()),
            reg_no: student.map(|s| s.reg_no.clone()).unwrap_or_default(),
            student_name: self.student_name.clone(),
            fee_type: self.effective_fee_type().trim().to_string(),
            course: self.course.clone(),
            fee_amount: parse_amount(&self.fee_amount),
            discount_amount: parse_amount(&self.discount_amount),
            net_amount: parse_amount(&self.net_amount),
            payment_method: self.effective_payment_method().trim().to_string(),
            transaction_id: self.transaction_id.trim().to_string(),
            payment_date: self.payment_date.trim().to_string(),
            remarks: self.remarks.trim().to_string(),
        }
    }

    /// Return the form to its initial empty state, including both
    /// "Other" toggles.
    pub fn reset(&mut self) {
        *self = FeeFormState::default();
    }
}

/// Normalize the truthy and falsy shapes legacy records use for boolean
/// fields to a fixed Yes/No display.
pub fn as_yes_no(value: &Value) -> &'static str {
    let truthy = match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => {
            matches!(text.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
        }
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        _ => false,
    };
    if truthy {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_student() -> Student {
        Student {
            id: "st-1042".to_string(),
            name: "Asha Verma".to_string(),
            father_name: "R Verma".to_string(),
            email: "asha@example.com".to_string(),
            mobile: "9876500001".to_string(),
            reg_no: "REG-2026-017".to_string(),
            course_python: false,
            course_iot: true,
            course_sql: true,
            course_web: false,
            total_fee: 12000.0,
            discount: 1500.0,
            net_fee: 10500.0,
            admission_date: "2026-06-01".to_string(),
            verified: json!("yes"),
            hostel: json!(0),
            photo: Some("uploads/st-1042/photo.jpg".to_string()),
            signature: None,
            id_proof: Some("uploads/st-1042/idproof.pdf".to_string()),
        }
    }

    fn filled_form() -> FeeFormState {
        let mut form = FeeFormState::default();
        form.apply(FeeField::FeeType("Tuition".to_string()));
        form.apply(FeeField::StudentIdentifier("st-1042".to_string()));
        form.apply(FeeField::FeeAmount("4500".to_string()));
        form.apply(FeeField::DiscountAmount("500".to_string()));
        form.apply(FeeField::PaymentMethod("Cash".to_string()));
        form.apply(FeeField::TransactionId("TXN-88".to_string()));
        form.apply(FeeField::PaymentDate("2026-08-07".to_string()));
        form
    }

    #[test]
    fn net_amount_is_fee_minus_discount() {
        let mut form = FeeFormState::default();
        form.apply(FeeField::FeeAmount("4500".to_string()));
        assert_eq!(form.net_amount, "4500");

        form.apply(FeeField::DiscountAmount("500".to_string()));
        assert_eq!(form.net_amount, "4000");

        form.apply(FeeField::FeeAmount("100.5".to_string()));
        assert_eq!(form.net_amount, "-399.5");
    }

    #[test]
    fn blank_or_non_numeric_amounts_count_as_zero() {
        let mut form = FeeFormState::default();
        form.apply(FeeField::FeeAmount("abc".to_string()));
        form.apply(FeeField::DiscountAmount("10".to_string()));
        assert_eq!(form.net_amount, "-10");

        form.apply(FeeField::DiscountAmount(String::new()));
        assert_eq!(form.net_amount, "0");
    }

    #[test]
    fn negative_net_amount_is_not_clamped() {
        let mut form = FeeFormState::default();
        form.apply(FeeField::FeeAmount("500".to_string()));
        form.apply(FeeField::DiscountAmount("800".to_string()));
        assert_eq!(form.net_amount, "-300");
    }

    #[test]
    fn fractional_amounts_keep_their_digits() {
        let mut form = FeeFormState::default();
        form.apply(FeeField::FeeAmount("100.5".to_string()));
        form.apply(FeeField::DiscountAmount("0.25".to_string()));
        assert_eq!(form.net_amount, "100.25");
    }

    #[test]
    fn other_choice_toggles_and_clears_free_text() {
        let mut form = FeeFormState::default();
        form.apply(FeeField::PaymentMethod("Other".to_string()));
        assert!(form.payment_method_is_other);

        form.apply(FeeField::PaymentMethodOther("Demand draft".to_string()));
        assert_eq!(form.effective_payment_method(), "Demand draft");

        form.apply(FeeField::PaymentMethod("Cash".to_string()));
        assert!(!form.payment_method_is_other);
        assert_eq!(form.payment_method_other, "");
        assert_eq!(form.effective_payment_method(), "Cash");

        form.apply(FeeField::FeeType("Other".to_string()));
        form.apply(FeeField::FeeTypeOther("Library fine".to_string()));
        assert_eq!(form.effective_fee_type(), "Library fine");
    }

    #[test]
    fn absorb_student_overwrites_dependent_fields() {
        let mut form = FeeFormState::default();
        form.apply(FeeField::FeeAmount("1".to_string()));
        form.student_name = "someone else".to_string();

        form.absorb_student(&sample_student());
        assert_eq!(form.student_name, "Asha Verma");
        assert_eq!(form.course, "IoT");
        assert_eq!(form.fee_amount, "12000");
        assert_eq!(form.discount_amount, "1500");
        assert_eq!(form.net_amount, "10500");
    }

    #[test]
    fn course_label_follows_fixed_precedence() {
        let mut student = sample_student();
        assert_eq!(student.course_label(), "IoT");

        student.course_python = true;
        assert_eq!(student.course_label(), "Python");

        student.course_python = false;
        student.course_iot = false;
        assert_eq!(student.course_label(), "SQL");

        student.course_sql = false;
        student.course_web = true;
        assert_eq!(student.course_label(), "Web Development");

        student.course_web = false;
        assert_eq!(student.course_label(), "");
    }

    #[test]
    fn validate_rejects_each_missing_required_field() {
        let required: [FeeField; 4] = [
            FeeField::FeeAmount(String::new()),
            FeeField::PaymentMethod(String::new()),
            FeeField::TransactionId(String::new()),
            FeeField::PaymentDate(String::new()),
        ];
        for blanked in required {
            let mut form = filled_form();
            form.apply(blanked.clone());
            assert!(form.validate().is_err(), "expected rejection for {:?}", blanked);
        }

        let mut form = filled_form();
        form.net_amount = String::new();
        assert!(form.validate().is_err());

        assert!(filled_form().validate().is_ok());
    }

    #[test]
    fn validate_rejects_malformed_payment_date() {
        let mut form = filled_form();
        form.apply(FeeField::PaymentDate("07/08/2026".to_string()));
        assert!(form.validate().is_err());
    }

    #[test]
    fn validate_requires_other_payment_text_when_toggled() {
        let mut form = filled_form();
        form.apply(FeeField::PaymentMethod("Other".to_string()));
        assert!(form.validate().is_err());

        form.apply(FeeField::PaymentMethodOther("Demand draft".to_string()));
        assert!(form.validate().is_ok());
    }

    #[test]
    fn reset_returns_everything_to_default() {
        let mut form = filled_form();
        form.apply(FeeField::FeeType("Other".to_string()));
        form.apply(FeeField::FeeTypeOther("Library fine".to_string()));
        form.apply(FeeField::PaymentMethod("Other".to_string()));
        form.apply(FeeField::Remarks("first installment".to_string()));

        form.reset();
        assert_eq!(form, FeeFormState::default());
        assert!(!form.fee_type_is_other);
        assert!(!form.payment_method_is_other);
    }

    #[test]
    fn create_request_coerces_amounts_and_resolves_other_fields() {
        let mut form = filled_form();
        form.apply(FeeField::PaymentMethod("Other".to_string()));
        form.apply(FeeField::PaymentMethodOther("Demand draft".to_string()));
        form.apply(FeeField::Remarks("  first installment ".to_string()));
        let student = sample_student();
        form.absorb_student(&student);

        let request = form.to_create_request(Some(&student));
        assert_eq!(request.student_id, "st-1042");
        assert_eq!(request.reg_no, "REG-2026-017");
        assert_eq!(request.fee_amount, 12000.0);
        assert_eq!(request.discount_amount, 1500.0);
        assert_eq!(request.net_amount, 10500.0);
        assert_eq!(request.payment_method, "Demand draft");
        assert_eq!(request.remarks, "first installment");

        // without a resolved student the raw identifier is passed through
        let request = form.to_create_request(None);
        assert_eq!(request.student_id, "st-1042");
        assert_eq!(request.reg_no, "");
    }

    #[test]
    fn envelope_prefers_error_over_message() {
        let envelope: ApiEnvelope<Fee> = ApiEnvelope {
            success: false,
            data: None,
            error: Some("duplicate transaction id".to_string()),
            message: Some("request failed".to_string()),
        };
        assert_eq!(envelope.failure_message(), "duplicate transaction id");

        let envelope: ApiEnvelope<Fee> = ApiEnvelope {
            success: false,
            data: None,
            error: Some("   ".to_string()),
            message: Some("request failed".to_string()),
        };
        assert_eq!(envelope.failure_message(), "request failed");

        let envelope: ApiEnvelope<Fee> = ApiEnvelope {
            success: false,
            data: None,
            error: None,
            message: None,
        };
        assert_eq!(
            envelope.failure_message(),
            "Something went wrong. Please try again."
        );
    }

    #[test]
    fn envelope_into_result_requires_data_on_success() {
        let envelope: ApiEnvelope<String> = ApiEnvelope {
            success: true,
            data: Some("payload".to_string()),
            error: None,
            message: None,
        };
        assert_eq!(envelope.into_result().unwrap(), "payload");

        let envelope: ApiEnvelope<String> = ApiEnvelope {
            success: true,
            data: None,
            error: None,
            message: None,
        };
        assert!(matches!(envelope.into_result(), Err(ApiError::Decode(_))));

        let envelope: ApiEnvelope<String> = ApiEnvelope {
            success: false,
            data: None,
            error: Some("nope".to_string()),
            message: None,
        };
        assert_eq!(
            envelope.into_result().unwrap_err(),
            ApiError::Backend("nope".to_string())
        );
    }

    #[test]
    fn envelope_deserializes_with_absent_fields() {
        let envelope: ApiEnvelope<Vec<Fee>> =
            serde_json::from_str(r#"{"success": false, "error": "no such student"}"#).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.data, None);
        assert_eq!(envelope.failure_message(), "no such student");
    }

    #[test]
    fn yes_no_normalization_covers_legacy_shapes() {
        for value in [json!(true), json!("true"), json!("yes"), json!("YES"), json!(1)] {
            assert_eq!(as_yes_no(&value), "Yes", "for {:?}", value);
        }
        for value in [
            json!(false),
            json!("false"),
            json!("no"),
            json!(0),
            Value::Null,
            json!("maybe"),
        ] {
            assert_eq!(as_yes_no(&value), "No", "for {:?}", value);
        }
    }

    #[test]
    fn amount_formatting_matches_form_display() {
        assert_eq!(format_amount(4000.0), "4000");
        assert_eq!(format_amount(-300.0), "-300");
        assert_eq!(format_amount(100.25), "100.25");
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(parse_amount(" 42.5 "), 42.5);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("12a"), 0.0);
    }
}
