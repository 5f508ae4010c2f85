//! JSON Schema check for decoded filings.
//!
//! The checkers assume every path they declare exists structurally. This
//! module is the schema handle used at load time to enforce that assumption
//! on JSON/YAML renderings; checkers never consult it.

use std::sync::OnceLock;

use jsonschema::Validator;

/// Filing schema, embedded at compile time.
const FILING_SCHEMA: &str = include_str!("../../schema/pension-document.schema.json");

static FILING_VALIDATOR: OnceLock<Result<Validator, String>> = OnceLock::new();

fn filing_validator() -> Result<&'static Validator, String> {
    FILING_VALIDATOR
        .get_or_init(|| {
            let schema: serde_json::Value = serde_json::from_str(FILING_SCHEMA)
                .map_err(|e| format!("Embedded filing schema is not JSON: {}", e))?;
            jsonschema::options()
                .build(&schema)
                .map_err(|e| format!("Embedded filing schema does not compile: {}", e))
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// Check a decoded filing against the schema.
///
/// Each violation is rendered as `<instance pointer>: <reason>`, the root
/// being shown as `/`.
pub fn validate_document_schema(document: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = filing_validator().map_err(|e| vec![e])?;

    let violations: Vec<String> = validator
        .iter_errors(document)
        .map(|error| {
            let pointer = error.instance_path.to_string();
            let at = if pointer.is_empty() { "/".to_string() } else { pointer };
            format!("{}: {}", at, error)
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Whether a decoded filing matches the schema.
pub fn is_valid_document(document: &serde_json::Value) -> bool {
    matches!(filing_validator(), Ok(validator) if validator.is_valid(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> serde_json::Value {
        json!({
            "KoteretKovetz": {
                "SUG-MIMSHAK": 4,
                "TAARICH-BITZUA": "20240131120000"
            },
            "YeshutYatzran": [{
                "Mutzarim": {
                    "Mutzar": [{
                        "NetuneiMutzar": {
                            "YeshutLakoach": { "TAARICH-LEYDA": "19800101" }
                        },
                        "HeshbonotOPolisot": {
                            "HeshbonOPolisa": [{
                                "TAARICH-NECHONUT": "20231231",
                                "TAARICH-HITZTARFUT-MUTZAR": "20100101",
                                "PirteiTaktziv": [{
                                    "PerutHafrashotLePolisa": [
                                        { "SUG-HAFRASHA": 1, "ACHUZ-HAFRASHA": "8.33" }
                                    ],
                                    "PerutHotzaot": {
                                        "HotzaotBafoalLehodeshDivoach": {
                                            "SACH-DMEI-BITUAH-SHENIGBOO": 12.5,
                                            "TOTAL-DMEI-NIHUL-HAFKADA": { "@xsi:nil": "true" }
                                        }
                                    }
                                }]
                            }]
                        }
                    }]
                }
            }]
        })
    }

    #[test]
    fn test_valid_document_passes_schema() {
        assert!(validate_document_schema(&minimal()).is_ok());
        assert!(is_valid_document(&minimal()));
    }

    #[test]
    fn test_missing_header_fails() {
        let value = json!({ "YeshutYatzran": [] });
        let errors = validate_document_schema(&value).unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_bad_timestamp_format_fails() {
        let mut value = minimal();
        value["KoteretKovetz"]["TAARICH-BITZUA"] = json!("2024-01-31");
        let errors = validate_document_schema(&value).unwrap_err();
        assert!(errors[0].starts_with("/KoteretKovetz/TAARICH-BITZUA: "));
    }

    #[test]
    fn test_unknown_category_fails() {
        let mut value = minimal();
        value["YeshutYatzran"][0]["Mutzarim"]["Mutzar"][0]["HeshbonotOPolisot"]["HeshbonOPolisa"][0]
            ["PirteiTaktziv"][0]["PerutHafrashotLePolisa"][0]["SUG-HAFRASHA"] = json!(4);
        assert!(!is_valid_document(&value));
    }

    #[test]
    fn test_non_numeric_amount_fails() {
        let mut value = minimal();
        value["YeshutYatzran"][0]["Mutzarim"]["Mutzar"][0]["HeshbonotOPolisot"]["HeshbonOPolisa"][0]
            ["PirteiTaktziv"][0]["PerutHafrashotLePolisa"][0]["ACHUZ-HAFRASHA"] = json!("eight");
        assert!(!is_valid_document(&value));
    }
}
