//! # Validation Module
//!
//! Client-side form validation for Anchorage.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE                                                  │
//! │  ├── Empty / length / password checks                                  │
//! │  └── Immediate banner text, no round trip                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Hosted backend                                               │
//! │  ├── Auth provider rules (duplicate email, ...)                        │
//! │  └── Row-level security on products                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function returns on the first failing rule, in the same order the
//! screens check them, so the user sees one message at a time.
//!
//! ## Usage
//! ```rust
//! use anchorage_core::types::LoginForm;
//! use anchorage_core::validation::validate_login_form;
//!
//! let form = LoginForm {
//!     email: " captain@example.com ".to_string(),
//!     password: "hunter22".to_string(),
//! };
//! let credentials = validate_login_form(&form).unwrap();
//! assert_eq!(credentials.email, "captain@example.com");
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{
    Credentials, ListingDraft, ListingForm, LoginForm, ProductCategory, Registration,
    RegistrationForm,
};
use crate::{MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH, MIN_PASSWORD_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Auth Forms
// =============================================================================

/// Validates the login form.
///
/// ## Rules
/// - Email (trimmed) and password must both be non-empty
/// - The password is passed through untouched (no trimming)
pub fn validate_login_form(form: &LoginForm) -> ValidationResult<Credentials> {
    let email = form.email.trim();

    if email.is_empty() || form.password.is_empty() {
        return Err(ValidationError::IncompleteForm);
    }

    Ok(Credentials {
        email: email.to_string(),
        password: form.password.clone(),
    })
}

/// Validates the registration form.
///
/// ## Rules (checked in order)
/// 1. Full name, email (both trimmed) and password are non-empty
/// 2. Password has at least [`MIN_PASSWORD_LENGTH`] characters
/// 3. Password equals its confirmation
///
/// ```rust
/// use anchorage_core::error::ValidationError;
/// use anchorage_core::types::RegistrationForm;
/// use anchorage_core::validation::validate_registration_form;
///
/// let form = RegistrationForm {
///     full_name: "Maria".to_string(),
///     email: "maria@example.com".to_string(),
///     password: "mango123".to_string(),
///     confirm_password: "mango124".to_string(),
/// };
/// assert_eq!(
///     validate_registration_form(&form),
///     Err(ValidationError::PasswordMismatch)
/// );
/// ```
pub fn validate_registration_form(form: &RegistrationForm) -> ValidationResult<Registration> {
    let full_name = form.full_name.trim();
    let email = form.email.trim();

    if full_name.is_empty() || email.is_empty() || form.password.is_empty() {
        return Err(ValidationError::IncompleteForm);
    }

    validate_password(&form.password)?;

    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    Ok(Registration {
        full_name: full_name.to_string(),
        email: email.to_string(),
        password: form.password.clone(),
    })
}

/// Validates password length.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "Password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Listing Form
// =============================================================================

/// Validates the seller dashboard form and produces a typed draft.
///
/// ## Rules (checked in order)
/// 1. Title is required after trimming, at most [`MAX_TITLE_LENGTH`] chars
/// 2. Description is optional, at most [`MAX_DESCRIPTION_LENGTH`] chars
/// 3. Price parses as a non-negative amount ([`Money::parse_input`])
/// 4. Quantity parses as a non-negative whole number
/// 5. Category is one of the form's options
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Seller clicks "Create Product"                                         │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_listing_form(&form) ← THIS FUNCTION                          │
/// │       │                                                                 │
/// │       ├── Err(e) → banner shows e.to_string(), nothing is sent         │
/// │       │                                                                 │
/// │       └── Ok(draft) → insert (new) or update (editing) in backend      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_listing_form(form: &ListingForm) -> ValidationResult<ListingDraft> {
    let title = validate_listing_title(&form.title)?;
    let description = validate_description(&form.description)?;
    let price = Money::parse_input(&form.price)?;
    let available_quantity = validate_quantity_input(&form.available_quantity)?;
    let category = validate_category(&form.category)?;

    let image_url = form.image_url.trim();
    let image_url = (!image_url.is_empty()).then(|| image_url.to_string());

    Ok(ListingDraft {
        title,
        description,
        price,
        category,
        image_url,
        is_mobile_seller: form.is_mobile_seller,
        available_quantity,
    })
}

/// Validates a listing title and returns it trimmed.
pub fn validate_listing_title(title: &str) -> ValidationResult<String> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "Product title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "Product title".to_string(),
            max: MAX_TITLE_LENGTH,
        });
    }

    Ok(title.to_string())
}

/// Validates an optional description. Blank becomes `None`.
pub fn validate_description(description: &str) -> ValidationResult<Option<String>> {
    let description = description.trim();

    if description.is_empty() {
        return Ok(None);
    }

    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "Description".to_string(),
            max: MAX_DESCRIPTION_LENGTH,
        });
    }

    Ok(Some(description.to_string()))
}

/// Parses the quantity input.
///
/// ```rust
/// use anchorage_core::validation::validate_quantity_input;
///
/// assert_eq!(validate_quantity_input("12").unwrap(), 12);
/// assert_eq!(validate_quantity_input("0").unwrap(), 0);
/// assert!(validate_quantity_input("-1").is_err());
/// assert!(validate_quantity_input("two").is_err());
/// ```
pub fn validate_quantity_input(input: &str) -> ValidationResult<u32> {
    let input = input.trim();

    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidQuantity);
    }

    input.parse().map_err(|_| ValidationError::InvalidQuantity)
}

/// Validates the category picker value.
pub fn validate_category(value: &str) -> ValidationResult<ProductCategory> {
    let category = ProductCategory::from(value.trim());

    if !category.is_known() {
        return Err(ValidationError::NotAllowed {
            field: "category".to_string(),
            allowed: ProductCategory::KNOWN
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
        });
    }

    Ok(category)
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string (listing or seller id).
///
/// ```rust
/// use anchorage_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_listing_form() -> ListingForm {
        ListingForm {
            title: "  Coconut Oil (1L) ".to_string(),
            description: "Cold-pressed virgin coconut oil.".to_string(),
            price: "12".to_string(),
            category: "food".to_string(),
            image_url: "   ".to_string(),
            is_mobile_seller: false,
            available_quantity: "5".to_string(),
        }
    }

    fn registration(password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            full_name: "Captain João".to_string(),
            email: "joao@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        let mut form = LoginForm {
            email: "   ".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(
            validate_login_form(&form),
            Err(ValidationError::IncompleteForm)
        );

        form.email = "a@b.co".to_string();
        form.password = String::new();
        assert_eq!(
            validate_login_form(&form),
            Err(ValidationError::IncompleteForm)
        );
    }

    #[test]
    fn test_login_keeps_password_whitespace() {
        let form = LoginForm {
            email: "a@b.co".to_string(),
            password: " padded ".to_string(),
        };
        let credentials = validate_login_form(&form).unwrap();
        assert_eq!(credentials.password, " padded ");
    }

    #[test]
    fn test_registration_rule_order() {
        let mut form = registration("abc", "xyz");
        form.full_name = " ".to_string();
        assert_eq!(
            validate_registration_form(&form),
            Err(ValidationError::IncompleteForm)
        );

        let form = registration("abc", "xyz");
        assert_eq!(
            validate_registration_form(&form).unwrap_err().to_string(),
            "Password must be at least 6 characters"
        );

        let form = registration("abcdef", "abcdeg");
        assert_eq!(
            validate_registration_form(&form),
            Err(ValidationError::PasswordMismatch)
        );

        let accepted = validate_registration_form(&registration("abcdef", "abcdef")).unwrap();
        assert_eq!(accepted.full_name, "Captain João");
    }

    #[test]
    fn test_listing_form_produces_trimmed_draft() {
        let draft = validate_listing_form(&filled_listing_form()).unwrap();
        assert_eq!(draft.title, "Coconut Oil (1L)");
        assert_eq!(draft.price.cents(), 1200);
        assert_eq!(draft.category, ProductCategory::Food);
        assert_eq!(draft.image_url, None);
        assert_eq!(draft.available_quantity, 5);
        assert_eq!(
            draft.description.as_deref(),
            Some("Cold-pressed virgin coconut oil.")
        );
    }

    #[test]
    fn test_listing_form_rule_order() {
        let mut form = filled_listing_form();
        form.title = "   ".to_string();
        form.price = "oops".to_string();
        assert_eq!(
            validate_listing_form(&form).unwrap_err().to_string(),
            "Product title is required"
        );

        let mut form = filled_listing_form();
        form.price = "-1".to_string();
        form.available_quantity = "x".to_string();
        assert_eq!(
            validate_listing_form(&form),
            Err(ValidationError::InvalidPrice)
        );

        let mut form = filled_listing_form();
        form.available_quantity = "-2".to_string();
        assert_eq!(
            validate_listing_form(&form),
            Err(ValidationError::InvalidQuantity)
        );
    }

    #[test]
    fn test_listing_length_limits() {
        assert!(validate_listing_title(&"A".repeat(100)).is_ok());
        assert!(validate_listing_title(&"A".repeat(101)).is_err());
        assert!(validate_description(&"d".repeat(500)).is_ok());
        assert!(validate_description(&"d".repeat(501)).is_err());
        assert_eq!(validate_description("  ").unwrap(), None);
    }

    #[test]
    fn test_validate_category() {
        assert_eq!(validate_category("nautical").unwrap(), ProductCategory::Nautical);
        assert!(matches!(
            validate_category("jewelry"),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("123").is_err());
    }
}
