//! Single-field validation rules.
//!
//! Every rule returns `Ok(())` or a [`ValidationError`] whose message names the
//! field. Inputs are the raw strings typed into a form; nothing here touches the
//! network or the application state.

use chrono::{DateTime, NaiveDate, Utc};

use super::ValidationError;

/// Weights applied to the first ten CUIT digits.
const CUIT_WEIGHTS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Prefixes accepted in front of an Argentine mobile number.
const PHONE_PREFIXES: [&str; 3] = ["+549", "549", "0"];

pub type Rule = Result<(), ValidationError>;

fn fail(field: &str, message: String) -> Rule {
    Err(ValidationError::new(field, message))
}

/// Fails when the value is empty after trimming.
pub fn required(value: &str, field: &str) -> Rule {
    if value.trim().is_empty() {
        return fail(field, format!("{field} es requerido"));
    }
    Ok(())
}

/// Fails unless the value parses as a number greater than zero.
pub fn positive(value: &str, field: &str) -> Rule {
    match value.trim().parse::<f64>() {
        Ok(num) if !num.is_nan() && num > 0.0 => Ok(()),
        _ => fail(field, format!("{field} debe ser mayor a 0")),
    }
}

/// Fails when the value is not a number within `[min, max]`.
pub fn range(value: &str, min: f64, max: f64, field: &str) -> Rule {
    let num = match value.trim().parse::<f64>() {
        Ok(num) if !num.is_nan() => num,
        _ => return fail(field, format!("{field} debe ser un número válido")),
    };
    if num < min || num > max {
        return fail(field, format!("{field} debe estar entre {min} y {max}"));
    }
    Ok(())
}

pub fn min_length(value: &str, min: usize, field: &str) -> Rule {
    if value.chars().count() < min {
        return fail(field, format!("{field} debe tener al menos {min} caracteres"));
    }
    Ok(())
}

pub fn max_length(value: &str, max: usize, field: &str) -> Rule {
    if value.chars().count() > max {
        return fail(field, format!("{field} no puede tener más de {max} caracteres"));
    }
    Ok(())
}

/// Accepts the basic `local@domain.tld` shape.
pub fn email(value: &str, field: &str) -> Rule {
    if is_email(value) {
        Ok(())
    } else {
        fail(field, format!("{field} debe ser un email válido"))
    }
}

fn is_email(value: &str) -> bool {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Needs a dot with at least one character on each side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Accepts national or `+549`-prefixed Argentine numbers once separators
/// (spaces, dashes, parentheses) are removed.
pub fn phone(value: &str, field: &str) -> Rule {
    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();

    let subscriber_ok = |rest: &str| {
        (10..=11).contains(&rest.len())
            && rest.chars().all(|c| c.is_ascii_digit())
            && !rest.starts_with('0')
    };

    let valid = subscriber_ok(&cleaned)
        || PHONE_PREFIXES
            .iter()
            .filter_map(|prefix| cleaned.strip_prefix(prefix))
            .any(subscriber_ok);

    if valid {
        Ok(())
    } else {
        fail(field, format!("{field} debe ser un teléfono válido"))
    }
}

/// Optional CUIT/CUIL: empty passes, otherwise eleven digits with a valid
/// mod-11 check digit.
pub fn cuit(value: &str, field: &str) -> Rule {
    if value.is_empty() {
        return Ok(());
    }

    let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 {
        return fail(field, format!("{field} debe tener 11 dígitos"));
    }

    let sum: u32 = digits
        .iter()
        .zip(CUIT_WEIGHTS.iter())
        .map(|(d, w)| d * w)
        .sum();
    let check_digit = match sum % 11 {
        0 => 0,
        1 => 9,
        remainder => 11 - remainder,
    };

    if digits[10] != check_digit {
        return fail(field, format!("{field} no es válido"));
    }
    Ok(())
}

/// Strips currency decoration (`$`, `,`, whitespace) from a price.
pub fn normalize_price(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '$' | ','))
        .collect()
}

/// Parses a price using the same normalization as [`price`].
///
/// Returns `None` when the value does not have the `123` / `123.4` / `123.45` shape.
pub fn parse_price(value: &str) -> Option<f64> {
    let normalized = normalize_price(value);
    if !has_price_shape(&normalized) {
        return None;
    }
    normalized.parse().ok()
}

fn has_price_shape(value: &str) -> bool {
    let (int_part, frac_part) = match value.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (value, None),
    };
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    if int_part.is_empty() || !all_digits(int_part) {
        return false;
    }
    match frac_part {
        None => true,
        Some(frac) => (1..=2).contains(&frac.len()) && all_digits(frac),
    }
}

/// Required price with at most two decimals and greater than zero.
pub fn price(value: &str, field: &str) -> Rule {
    required(value, field)?;

    let Some(num) = parse_price(value) else {
        return fail(field, format!("{field} debe ser un precio válido (ej: 123.45)"));
    };
    if num <= 0.0 {
        return fail(field, format!("{field} debe ser mayor a 0"));
    }
    Ok(())
}

pub fn not_empty_array<T>(items: &[T], field: &str) -> Rule {
    if items.is_empty() {
        return fail(field, format!("{field} debe contener al menos un elemento"));
    }
    Ok(())
}

/// Accepts an RFC 3339 timestamp or a plain `YYYY-MM-DD` date that is not
/// later than the current time.
pub fn not_future_date(value: &str, field: &str) -> Rule {
    not_future_date_at(value, Utc::now(), field)
}

pub(crate) fn not_future_date_at(value: &str, now: DateTime<Utc>, field: &str) -> Rule {
    let Some(date) = parse_date(value.trim()) else {
        return fail(field, format!("{field} no es una fecha válida"));
    };
    if date > now {
        return fail(field, format!("{field} no puede ser una fecha futura"));
    }
    Ok(())
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

pub fn exists_in_list<T: PartialEq>(value: &T, list: &[T], field: &str) -> Rule {
    if !list.contains(value) {
        return fail(field, format!("{field} seleccionado no es válido"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_required_rejects_blank() {
        assert!(required("Muzza", "Tipo").is_ok());
        let err = required("   ", "Tipo").unwrap_err();
        assert_eq!(err.message, "Tipo es requerido");
        assert_eq!(err.field, "Tipo");
    }

    #[test]
    fn test_positive() {
        assert!(positive("0.5", "Cantidad").is_ok());
        assert!(positive("0", "Cantidad").is_err());
        assert!(positive("-3", "Cantidad").is_err());
        assert!(positive("NaN", "Cantidad").is_err());
        assert_eq!(
            positive("abc", "Cantidad").unwrap_err().message,
            "Cantidad debe ser mayor a 0"
        );
    }

    #[test]
    fn test_range_is_inclusive() {
        assert!(range("1", 1.0, 10.0, "Cantidad").is_ok());
        assert!(range("10", 1.0, 10.0, "Cantidad").is_ok());
        assert_eq!(
            range("11", 1.0, 10.0, "Cantidad").unwrap_err().message,
            "Cantidad debe estar entre 1 y 10"
        );
        assert_eq!(
            range("x", 1.0, 10.0, "Cantidad").unwrap_err().message,
            "Cantidad debe ser un número válido"
        );
    }

    #[test]
    fn test_lengths_count_chars() {
        assert!(min_length("Jamón", 5, "Nombre").is_ok());
        assert!(min_length("J", 2, "Nombre").is_err());
        assert!(max_length("ñññ", 3, "Nombre").is_ok());
        assert_eq!(
            max_length("abcd", 3, "Nombre").unwrap_err().message,
            "Nombre no puede tener más de 3 caracteres"
        );
    }

    #[test]
    fn test_email_shape() {
        assert!(email("juan@ecos.com.ar", "Email").is_ok());
        assert!(email("a@b.c", "Email").is_ok());
        for bad in ["", "juan", "juan@", "@ecos.com", "juan@ecos", "juan@.com", "juan@ecos.", "ju an@ecos.com", "a@b@c.com"] {
            assert!(email(bad, "Email").is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_phone_formats() {
        assert!(phone("+54 9 11 2345-6789", "Teléfono").is_ok());
        assert!(phone("5491123456789", "Teléfono").is_ok());
        assert!(phone("011 2345 6789", "Teléfono").is_ok());
        assert!(phone("(11) 2345-6789", "Teléfono").is_ok());
        assert!(phone("12345678", "Teléfono").is_err());
        assert!(phone("0123456789", "Teléfono").is_err());
        assert!(phone("11-2345-abcd", "Teléfono").is_err());
    }

    #[test]
    fn test_cuit_check_digit() {
        assert!(cuit("20267565393", "CUIT").is_ok());
        assert!(cuit("20-26756539-3", "CUIT").is_ok());
        assert!(cuit("", "CUIT").is_ok());
        assert_eq!(cuit("   ", "CUIT").unwrap_err().message, "CUIT debe tener 11 dígitos");
        assert_eq!(cuit("11111111111", "CUIT").unwrap_err().message, "CUIT no es válido");
        assert_eq!(cuit("2026756539", "CUIT").unwrap_err().message, "CUIT debe tener 11 dígitos");
    }

    #[test]
    fn test_price() {
        assert!(price("123.45", "Precio").is_ok());
        assert!(price("$ 1,500", "Precio").is_ok());
        assert!(price("99.9", "Precio").is_ok());
        assert_eq!(
            price("-10", "Precio").unwrap_err().message,
            "Precio debe ser un precio válido (ej: 123.45)"
        );
        assert!(price("abc", "Precio").is_err());
        assert!(price("12.345", "Precio").is_err());
        assert_eq!(price("0.00", "Precio").unwrap_err().message, "Precio debe ser mayor a 0");
        assert_eq!(price("", "Precio").unwrap_err().message, "Precio es requerido");
    }

    #[test]
    fn test_parse_price_normalizes() {
        assert_eq!(parse_price("$1,234.50"), Some(1234.5));
        assert_eq!(parse_price("1.2.3"), None);
    }

    #[test]
    fn test_not_future_date() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert!(not_future_date_at("2025-05-31", now, "Fecha").is_ok());
        assert!(not_future_date_at("2025-06-01T11:59:00Z", now, "Fecha").is_ok());
        assert_eq!(
            not_future_date_at("2025-06-02", now, "Fecha").unwrap_err().message,
            "Fecha no puede ser una fecha futura"
        );
        assert_eq!(
            not_future_date_at("ayer", now, "Fecha").unwrap_err().message,
            "Fecha no es una fecha válida"
        );
        assert!(not_future_date("2000-01-01", "Fecha").is_ok());
    }

    #[test]
    fn test_exists_in_list() {
        let vendedores = vec!["Juan".to_string(), "Ana".to_string()];
        assert!(exists_in_list(&"Ana".to_string(), &vendedores, "Vendedor").is_ok());
        assert_eq!(
            exists_in_list(&"Pedro".to_string(), &vendedores, "Vendedor").unwrap_err().message,
            "Vendedor seleccionado no es válido"
        );
    }

    #[test]
    fn test_not_empty_array() {
        let empty: Vec<u32> = vec![];
        assert_eq!(
            not_empty_array(&empty, "Productos").unwrap_err().message,
            "Productos debe contener al menos un elemento"
        );
        assert!(not_empty_array(&[1], "Productos").is_ok());
    }
}
