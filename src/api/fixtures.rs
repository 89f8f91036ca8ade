use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Record {
    pub id: u32,
    pub date: String,
    pub idnumber: &'static str,
    pub name: &'static str,
    pub course: &'static str,
    pub case: &'static str,
    pub remarks: &'static str,
}

#[derive(Debug, Serialize)]
pub struct User {
    pub id: u32,
    pub idnumber: &'static str,
    pub name: &'static str,
    pub is_admin: u8,
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn sample_record() -> Record {
    Record {
        id: 1,
        date: now_iso(),
        idnumber: "2023-001",
        name: "Sample Student",
        course: "BSCS",
        case: "Headache",
        remarks: "Given Paracetamol",
    }
}

pub fn records() -> Vec<Record> {
    vec![
        sample_record(),
        Record {
            id: 2,
            date: now_iso(),
            idnumber: "2023-002",
            name: "Jane Doe",
            course: "BSIT",
            case: "Fever",
            remarks: "Sent home",
        },
    ]
}

pub fn users() -> Vec<User> {
    vec![User {
        id: 1,
        idnumber: "ADMIN01",
        name: "Admin User",
        is_admin: 1,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn timestamp_is_iso_with_millis() {
        let ts = now_iso();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2024-01-01T00:00:00.000Z".len());
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn record_fields_serialize_in_order() {
        let json = serde_json::to_string(&sample_record()).unwrap();
        let keys = ["\"id\"", "\"date\"", "\"idnumber\"", "\"name\"", "\"course\"", "\"case\"", "\"remarks\""];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
