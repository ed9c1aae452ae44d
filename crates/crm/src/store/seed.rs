//! Example leads for a fresh install.

use chrono::NaiveDate;

use monster_wash_core::{CustomerName, CustomerRecord, LeadStatus};

const SEED_ROWS: &[(&str, &str, &str, LeadStatus, &str, &str)] = &[
    ("张三", "13800000001", "奥迪A6", LeadStatus::Potential, "周末来店", "staff1"),
    ("李四", "13800000002", "宝马X5", LeadStatus::Interested, "问了镀晶价格", "staff1"),
    ("王五", "13800000003", "特斯拉Model 3", LeadStatus::Won, "办了年卡", "staff2"),
    ("赵六", "13800000004", "丰田凯美瑞", LeadStatus::Lost, "", "staff2"),
];

/// Four example leads, one per status, split between `staff1` and `staff2`.
#[must_use]
pub fn seed_records(today: NaiveDate) -> Vec<CustomerRecord> {
    SEED_ROWS
        .iter()
        .filter_map(|&(name, phone, vehicle, status, notes, owner)| {
            Some(CustomerRecord {
                name: CustomerName::parse(name).ok()?,
                phone: phone.to_owned(),
                vehicle: vehicle.to_owned(),
                status,
                notes: notes.to_owned(),
                owner: owner.to_owned(),
                created_on: today,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_covers_every_status() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        let records = seed_records(today);
        assert_eq!(records.len(), 4);
        for status in LeadStatus::ALL {
            assert!(records.iter().any(|r| r.status == status));
        }
        assert!(records.iter().all(|r| r.created_on == today));
    }
}
