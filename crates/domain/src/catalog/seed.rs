//! Seed catalog used to populate an empty store on startup.

use chrono::NaiveDate;

use crate::money::Money;

use super::medicine::{Category, Medicine, MedicineId};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // Seed dates are static literals; an invalid one falls back to the
    // epoch date, which the seed validity test would catch.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Returns the built-in medicine list.
pub fn seed_medicines() -> Vec<Medicine> {
    vec![
        Medicine {
            id: MedicineId::new("MED-001"),
            name: "Paracetamol 500mg".to_string(),
            brand_example: "Crocin Advance".to_string(),
            salt: "Paracetamol (500mg)".to_string(),
            category: Category::PainRelief,
            uses: strings(&["fever", "headache", "body ache"]),
            description: "First-line antipyretic and analgesic for everyday fever and mild pain."
                .to_string(),
            generic_price: Money::from_paise(1450),
            branded_price: Money::from_paise(4900),
            strip_size: 15,
            expiry_date: date(2027, 6, 30),
            dosage: "1 tablet every 6-8 hours after food; maximum 4 tablets in 24 hours"
                .to_string(),
            side_effects: strings(&["nausea", "skin rash (rare)"]),
            image_ref: "/images/paracetamol-500.svg".to_string(),
        },
        Medicine {
            id: MedicineId::new("MED-002"),
            name: "Metformin 500mg".to_string(),
            brand_example: "Glycomet 500".to_string(),
            salt: "Metformin Hydrochloride (500mg)".to_string(),
            category: Category::Diabetes,
            uses: strings(&["type 2 diabetes", "blood sugar control"]),
            description: "Biguanide that lowers hepatic glucose production; the usual first \
                          medication for type 2 diabetes."
                .to_string(),
            generic_price: Money::from_paise(1800),
            branded_price: Money::from_paise(6450),
            strip_size: 20,
            expiry_date: date(2027, 11, 30),
            dosage: "1 tablet twice daily with meals, or as directed".to_string(),
            side_effects: strings(&[
                "stomach upset",
                "metallic taste",
                "vitamin B12 deficiency (long term)",
            ]),
            image_ref: "/images/metformin-500.svg".to_string(),
        },
        Medicine {
            id: MedicineId::new("MED-003"),
            name: "Atorvastatin 10mg".to_string(),
            brand_example: "Atorva 10".to_string(),
            salt: "Atorvastatin Calcium (10mg)".to_string(),
            category: Category::Cardiac,
            uses: strings(&["high cholesterol", "heart disease prevention"]),
            description: "Statin that reduces LDL cholesterol and cardiovascular risk."
                .to_string(),
            generic_price: Money::from_paise(3200),
            branded_price: Money::from_paise(11500),
            strip_size: 10,
            expiry_date: date(2028, 1, 31),
            dosage: "1 tablet once daily at night".to_string(),
            side_effects: strings(&["muscle pain", "headache"]),
            image_ref: "/images/atorvastatin-10.svg".to_string(),
        },
        Medicine {
            id: MedicineId::new("MED-004"),
            name: "Amoxicillin 500mg".to_string(),
            brand_example: "Mox 500".to_string(),
            salt: "Amoxicillin Trihydrate (500mg)".to_string(),
            category: Category::Antibiotics,
            uses: strings(&["bacterial infections", "throat infection", "ear infection"]),
            description: "Broad-spectrum penicillin antibiotic; complete the prescribed course."
                .to_string(),
            generic_price: Money::from_paise(5850),
            branded_price: Money::from_paise(11800),
            strip_size: 10,
            expiry_date: date(2026, 12, 31),
            dosage: "1 capsule every 8 hours for the prescribed course".to_string(),
            side_effects: strings(&["diarrhoea", "nausea", "allergic rash"]),
            image_ref: "/images/amoxicillin-500.svg".to_string(),
        },
        Medicine {
            id: MedicineId::new("MED-005"),
            name: "Cetirizine 10mg".to_string(),
            brand_example: "Cetzine".to_string(),
            salt: "Cetirizine Dihydrochloride (10mg)".to_string(),
            category: Category::Allergy,
            uses: strings(&["allergic rhinitis", "urticaria", "sneezing"]),
            description: "Second-generation antihistamine for seasonal and skin allergies."
                .to_string(),
            generic_price: Money::from_paise(850),
            branded_price: Money::from_paise(2600),
            strip_size: 10,
            expiry_date: date(2027, 9, 30),
            dosage: "1 tablet once daily, preferably at night".to_string(),
            side_effects: strings(&["drowsiness", "dry mouth"]),
            image_ref: "/images/cetirizine-10.svg".to_string(),
        },
        Medicine {
            id: MedicineId::new("MED-006"),
            name: "Omeprazole 20mg".to_string(),
            brand_example: "Omez".to_string(),
            salt: "Omeprazole (20mg)".to_string(),
            category: Category::Gastro,
            uses: strings(&["acidity", "gastric ulcer", "reflux"]),
            description: "Proton-pump inhibitor that suppresses gastric acid secretion."
                .to_string(),
            generic_price: Money::from_paise(2400),
            branded_price: Money::from_paise(7650),
            strip_size: 20,
            expiry_date: date(2027, 4, 30),
            dosage: "1 capsule before breakfast".to_string(),
            side_effects: strings(&["headache", "constipation"]),
            image_ref: "/images/omeprazole-20.svg".to_string(),
        },
        Medicine {
            id: MedicineId::new("MED-007"),
            name: "Amlodipine 5mg".to_string(),
            brand_example: "Amlong 5".to_string(),
            salt: "Amlodipine Besylate (5mg)".to_string(),
            category: Category::Cardiac,
            uses: strings(&["high blood pressure", "angina"]),
            description: "Calcium-channel blocker for sustained blood pressure control."
                .to_string(),
            generic_price: Money::from_paise(1280),
            branded_price: Money::from_paise(4500),
            strip_size: 15,
            expiry_date: date(2028, 3, 31),
            dosage: "1 tablet once daily at the same time".to_string(),
            side_effects: strings(&["ankle swelling", "flushing", "dizziness"]),
            image_ref: "/images/amlodipine-5.svg".to_string(),
        },
        Medicine {
            id: MedicineId::new("MED-008"),
            name: "Azithromycin 500mg".to_string(),
            brand_example: "Azithral 500".to_string(),
            salt: "Azithromycin (500mg)".to_string(),
            category: Category::Antibiotics,
            uses: strings(&["respiratory infections", "skin infections"]),
            description: "Macrolide antibiotic taken as a short three-day course.".to_string(),
            generic_price: Money::from_paise(7150),
            branded_price: Money::from_paise(13200),
            strip_size: 3,
            expiry_date: date(2026, 10, 31),
            dosage: "1 tablet once daily for 3 days, one hour before food".to_string(),
            side_effects: strings(&["abdominal pain", "loose stools"]),
            image_ref: "/images/azithromycin-500.svg".to_string(),
        },
    ]
}
