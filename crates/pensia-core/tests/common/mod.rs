#![allow(dead_code)]

use serde_json::{json, Value};

/// JSON pointer to the first policy of the clean filing.
pub const POLICY_A: &str = "/YeshutYatzran/0/Mutzarim/Mutzar/0/HeshbonotOPolisot/HeshbonOPolisa/0";

/// JSON pointer to the second policy of the clean filing.
pub const POLICY_B: &str = "/YeshutYatzran/0/Mutzarim/Mutzar/0/HeshbonotOPolisot/HeshbonOPolisa/1";

fn ytd(category: u8, month: &str, amount: &str, salary: &str) -> Value {
    json!({
        "SUG-HAFRASHA": category,
        "CHODESH-SACHAR": month,
        "SCHUM-HAFKADA-SHESHULAM": amount,
        "SACHAR-BERAMAT-HAFKADA": salary
    })
}

fn item(amount: &str, salary: &str) -> Value {
    json!({ "SCHUM-HAFKADA-SHESHULAM": amount, "SACHAR-BERAMAT-HAFKADA": salary })
}

/// A filing with two policies that satisfies every rule.
///
/// Policy A: salary 10000, two salary months, a health fund entry, premium 10
/// and management fee 5. Policy B: salary 8000, one salary month, nil premium.
pub fn clean_filing() -> Value {
    let policy_a = json!({
        "TAARICH-NECHONUT": "20231231",
        "TAARICH-HITZTARFUT-MUTZAR": "20100101",
        "PirteiTaktziv": [{
            "PirteiHafkadaAchrona": {
                "PerutPirteiHafkadaAchrona": [{
                    "TOTAL-HAFKADA": "2083",
                    "TOTAL-HAFKADA-ACHRONA": "2068",
                    "PerutHafkadaAchrona": [
                        item("833", "10000"),
                        item("600", "10000"),
                        item("650", "10000")
                    ]
                }]
            },
            "PerutHafkadotMetchilatShana": [
                ytd(1, "202401", "833", "10000"),
                ytd(2, "202401", "600", "10000"),
                ytd(3, "202401", "650", "10000"),
                ytd(8, "202401", "50", "10000"),
                ytd(1, "202402", "833", "10000"),
                ytd(2, "202402", "600", "10000"),
                ytd(3, "202402", "650", "10000")
            ],
            "HafkadotShnatiyot": {
                "TOTAL-HAFKADOT-PITZUIM-SHANA-NOCHECHIT": "1666",
                "TOTAL-HAFKADOT-OVED-TAGMULIM-SHANA-NOCHECHIT": "1200",
                "TOTAL-HAFKADOT-MAAVID-TAGMULIM-SHANA-NOCHECHIT": "1300"
            },
            "PerutHafrashotLePolisa": [
                { "SUG-HAFRASHA": 1, "ACHUZ-HAFRASHA": "8.33" },
                { "SUG-HAFRASHA": 2, "ACHUZ-HAFRASHA": "6.0" },
                { "SUG-HAFRASHA": 3, "ACHUZ-HAFRASHA": "6.5" },
                { "SUG-HAFRASHA": 8, "ACHUZ-HAFRASHA": "0.5" }
            ],
            "PerutHotzaot": {
                "HotzaotBafoalLehodeshDivoach": {
                    "SACH-DMEI-BITUAH-SHENIGBOO": "10",
                    "TOTAL-DMEI-NIHUL-HAFKADA": "5"
                }
            }
        }]
    });

    let policy_b = json!({
        "TAARICH-NECHONUT": "20231231",
        "TAARICH-HITZTARFUT-MUTZAR": "20150601",
        "PirteiTaktziv": [{
            "PirteiHafkadaAchrona": {
                "PerutPirteiHafkadaAchrona": [{
                    "TOTAL-HAFKADA": "1560",
                    "TOTAL-HAFKADA-ACHRONA": "1560",
                    "PerutHafkadaAchrona": [
                        item("480", "8000"),
                        item("520", "8000"),
                        item("560", "8000")
                    ]
                }]
            },
            "PerutHafkadotMetchilatShana": [
                ytd(1, "202401", "480", "8000"),
                ytd(2, "202401", "520", "8000"),
                ytd(3, "202401", "560", "8000")
            ],
            "HafkadotShnatiyot": {
                "TOTAL-HAFKADOT-PITZUIM-SHANA-NOCHECHIT": "480",
                "TOTAL-HAFKADOT-OVED-TAGMULIM-SHANA-NOCHECHIT": "520",
                "TOTAL-HAFKADOT-MAAVID-TAGMULIM-SHANA-NOCHECHIT": "560"
            },
            "PerutHafrashotLePolisa": [
                { "SUG-HAFRASHA": 1, "ACHUZ-HAFRASHA": "6.0" },
                { "SUG-HAFRASHA": 2, "ACHUZ-HAFRASHA": "6.5" },
                { "SUG-HAFRASHA": 3, "ACHUZ-HAFRASHA": "7.0" }
            ],
            "PerutHotzaot": {
                "HotzaotBafoalLehodeshDivoach": {
                    "SACH-DMEI-BITUAH-SHENIGBOO": { "@xsi:nil": "true" },
                    "TOTAL-DMEI-NIHUL-HAFKADA": "0"
                }
            }
        }]
    });

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
                        "HeshbonOPolisa": [policy_a, policy_b]
                    }
                }]
            }
        }]
    })
}

/// Replace the value at a JSON pointer.
pub fn set(value: &mut Value, pointer: &str, new: Value) {
    *value
        .pointer_mut(pointer)
        .unwrap_or_else(|| panic!("no value at {}", pointer)) = new;
}
