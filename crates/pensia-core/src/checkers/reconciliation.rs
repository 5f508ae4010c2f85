//! Net/gross reconciliation of the most recent contribution.

use rust_decimal::Decimal;

use crate::document::Record;
use crate::CheckError;

use super::{Checker, Findings, RunContext, BUDGET_PATH};

/// Net last contribution equals gross minus the insurance premium and the
/// management fee charged on the contribution.
///
/// Every most-recent-contribution entry of the budget block is reconciled
/// against the block's actual-expenses record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NetGrossChecker;

impl Checker for NetGrossChecker {
    fn name(&self) -> &'static str {
        "net-gross"
    }

    fn description(&self) -> &'static str {
        "Net last contribution equals gross minus insurance premium minus management fee"
    }

    fn anchor(&self) -> &'static str {
        BUDGET_PATH
    }

    fn check_one(
        &self,
        record: &Record<'_>,
        _context: &RunContext<'_>,
        findings: &mut Findings,
    ) -> Result<(), CheckError> {
        let expenses = record.record("PerutHotzaot/HotzaotBafoalLehodeshDivoach")?;
        let insurance_premium = expenses.decimal_or("SACH-DMEI-BITUAH-SHENIGBOO", Decimal::ZERO)?;
        let management_fee = expenses.decimal_or("TOTAL-DMEI-NIHUL-HAFKADA", Decimal::ZERO)?;

        for entry in record.records("PirteiHafkadaAchrona/PerutPirteiHafkadaAchrona")? {
            let gross = entry.decimal("TOTAL-HAFKADA")?;
            let net = entry.decimal("TOTAL-HAFKADA-ACHRONA")?;

            let expected = gross
                .checked_sub(insurance_premium)
                .and_then(|rest| rest.checked_sub(management_fee))
                .ok_or_else(|| CheckError::ArithmeticOverflow {
                    operation: format!("{} - {} - {}", gross, insurance_premium, management_fee),
                    pointer: entry.pointer().to_string(),
                })?;

            findings.ensure(
                net == expected,
                format!(
                    "Net last contribution does not match gross minus insurance premium \
                     minus management fee ({} != {} - {} - {})",
                    net, gross, insurance_premium, management_fee
                ),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::testing::filing_with_budgets;
    use serde_json::{json, Value};

    fn budget(gross: &str, net: &str, premium: Value, fee: Value) -> Value {
        json!([{
            "PirteiHafkadaAchrona": {
                "PerutPirteiHafkadaAchrona": [{
                    "TOTAL-HAFKADA": gross,
                    "TOTAL-HAFKADA-ACHRONA": net
                }]
            },
            "PerutHotzaot": {
                "HotzaotBafoalLehodeshDivoach": {
                    "SACH-DMEI-BITUAH-SHENIGBOO": premium,
                    "TOTAL-DMEI-NIHUL-HAFKADA": fee
                }
            }
        }])
    }

    #[test]
    fn test_net_matches() {
        let doc = filing_with_budgets(budget("1000", "930", json!("50"), json!("20")));
        assert!(NetGrossChecker.check(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_net_mismatch_cites_values() {
        let doc = filing_with_budgets(budget("1000", "900", json!("50"), json!("20")));
        let problems = NetGrossChecker.check(&doc).unwrap();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].message.ends_with("(900 != 1000 - 50 - 20)"));
    }

    #[test]
    fn test_nil_fee_counts_as_zero() {
        let nil = json!({ "@xsi:nil": "true" });
        let doc = filing_with_budgets(budget("1000", "950", json!(50), nil.clone()));
        assert!(NetGrossChecker.check(&doc).unwrap().is_empty());

        let doc = filing_with_budgets(budget("1000", "930", json!(50), nil));
        let problems = NetGrossChecker.check(&doc).unwrap();
        assert!(problems[0].message.ends_with("(930 != 1000 - 50 - 0)"));
    }

    #[test]
    fn test_absent_fee_is_structural_error() {
        let doc = filing_with_budgets(json!([{
            "PirteiHafkadaAchrona": { "PerutPirteiHafkadaAchrona": [] },
            "PerutHotzaot": {
                "HotzaotBafoalLehodeshDivoach": { "SACH-DMEI-BITUAH-SHENIGBOO": 0 }
            }
        }]));
        assert!(matches!(
            NetGrossChecker.check(&doc),
            Err(CheckError::MissingField { ref field, .. }) if field == "TOTAL-DMEI-NIHUL-HAFKADA"
        ));
    }

    #[test]
    fn test_every_last_contribution_entry_is_reconciled() {
        let doc = filing_with_budgets(json!([{
            "PirteiHafkadaAchrona": {
                "PerutPirteiHafkadaAchrona": [
                    { "TOTAL-HAFKADA": "1000", "TOTAL-HAFKADA-ACHRONA": "990" },
                    { "TOTAL-HAFKADA": "500", "TOTAL-HAFKADA-ACHRONA": "480" }
                ]
            },
            "PerutHotzaot": {
                "HotzaotBafoalLehodeshDivoach": {
                    "SACH-DMEI-BITUAH-SHENIGBOO": "10",
                    "TOTAL-DMEI-NIHUL-HAFKADA": null
                }
            }
        }]));
        let problems = NetGrossChecker.check(&doc).unwrap();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].message.contains("(480 != 500 - 10 - 0)"));
    }
}
