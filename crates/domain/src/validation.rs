// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::LineItem;
use rust_decimal::Decimal;

/// Maximum length of titles and unit-of-measure codes.
const MAX_TITLE_LENGTH: usize = 200;
const MAX_UNIT_LENGTH: usize = 20;
const MAX_OBSERVATIONS_LENGTH: usize = 2000;

/// Validates a purchase request or bidding process title.
///
/// # Errors
///
/// Returns an error if the title is blank or longer than 200 characters.
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(DomainError::InvalidTitle(format!(
            "Title cannot exceed {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates optional observations text.
///
/// # Errors
///
/// Returns an error if the text is present but blank, or too long.
pub fn validate_observations(observations: Option<&str>) -> Result<(), DomainError> {
    if let Some(text) = observations {
        if text.trim().is_empty() {
            return Err(DomainError::InvalidObservations(String::from(
                "Observations cannot be blank when provided",
            )));
        }
        if text.len() > MAX_OBSERVATIONS_LENGTH {
            return Err(DomainError::InvalidObservations(format!(
                "Observations cannot exceed {MAX_OBSERVATIONS_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/// Validates a line item's field constraints.
///
/// This function is pure and checks only intrinsic constraints; it does NOT
/// check parent-request state (that requires context).
///
/// # Errors
///
/// Returns an error if:
/// - The description is blank
/// - The unit of measure is blank or too long
/// - The quantity is not strictly positive
/// - The unit price is negative
pub fn validate_line_item(item: &LineItem) -> Result<(), DomainError> {
    if item.description.trim().is_empty() {
        return Err(DomainError::InvalidItemDescription(String::from(
            "Description cannot be empty",
        )));
    }

    if item.unit.trim().is_empty() {
        return Err(DomainError::InvalidUnitOfMeasure(String::from(
            "Unit of measure cannot be empty",
        )));
    }
    if item.unit.len() > MAX_UNIT_LENGTH {
        return Err(DomainError::InvalidUnitOfMeasure(format!(
            "Unit of measure cannot exceed {MAX_UNIT_LENGTH} characters"
        )));
    }

    if item.quantity <= Decimal::ZERO {
        return Err(DomainError::InvalidQuantity {
            quantity: item.quantity,
        });
    }

    if item.unit_price < Decimal::ZERO {
        return Err(DomainError::InvalidUnitPrice {
            price: item.unit_price,
        });
    }

    Ok(())
}
