//! Mapping between the local record and the webhook's field names.
//!
//! The webhook has used two naming schemes over time: localized spreadsheet headers
//! (`Passeio`, `Custo Comissão`, ...) and camel-case names matching the local model
//! (`expedition`, `commissionCost`, ...). [`Field`] is the internal schema; every field
//! knows its labels in both schemes, and [`Field::from_label`] goes the other way.
//! Records are decoded from either scheme and always encoded in camel case.

use std::str::FromStr;

use serde_json::{Map, Value};
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};
use tracing::{debug, warn};

use crate::{
    catalog::{Status, resolve_expedition},
    money::{coerce_json, to_json},
    record::{
        RevenueRecord, RowNumber,
        date::{format_input, parse_date},
    },
    revenue::Cost,
};

pub const FREE_REVENUE_KEY: &str = "receitaLivre";
pub const OPERATION_KEY: &str = "operation";

/// A field of the revenue record.
///
/// `Display` gives the camel-case wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    Date,
    Expedition,
    Seller,
    PackageValue,
    IndividualValue,
    ClientName,
    IdVehicle,
    GuidesCost,
    CommissionCost,
    FerryCost,
    CoolerCost,
    FuelCost,
    ExternalSeller,
    Observation,
    Status,
    #[strum(serialize = "row_number")]
    RowNumber,
}

impl Field {
    /// The camel-case name used in submissions.
    pub fn wire_name(self) -> &'static str {
        self.into()
    }

    /// Spreadsheet headers this field has been published under, most recent first.
    pub fn localized_labels(self) -> &'static [&'static str] {
        match self {
            Field::Date => &["Data de Entrada"],
            Field::Expedition => &["Passeio"],
            Field::Seller => &["Vendedor Interno"],
            Field::PackageValue => &["Valor do Passeio"],
            Field::IndividualValue => &["Valor Individual"],
            Field::ClientName => &["Nome do Cliente"],
            Field::IdVehicle => &["ID Veiculo"],
            Field::GuidesCost => &["Custo Guia"],
            Field::CommissionCost => &["Custo Comissão"],
            Field::FerryCost => &["Custo Balsa"],
            Field::CoolerCost => &["Custo Cooler"],
            Field::FuelCost => &["Custo Combustivel"],
            Field::ExternalSeller => &["Vendedor Externo"],
            Field::Observation => &["Observação"],
            Field::Status => &["STATUS"],
            Field::RowNumber => &["row_number", "Row Number"],
        }
    }

    /// The label shown to users for this field.
    pub fn display_label(self) -> &'static str {
        match self {
            Field::RowNumber => "Linha",
            other => other.localized_labels().first().copied().unwrap_or("?"),
        }
    }

    /// Resolve an external label in either naming scheme back to its field.
    pub fn from_label(label: &str) -> Option<Field> {
        Field::iter().find(|field| {
            field.wire_name() == label || field.localized_labels().contains(&label)
        })
    }

    pub fn cost(self) -> Option<Cost> {
        match self {
            Field::GuidesCost => Some(Cost::Guides),
            Field::CommissionCost => Some(Cost::Commission),
            Field::FerryCost => Some(Cost::Ferry),
            Field::CoolerCost => Some(Cost::Cooler),
            Field::FuelCost => Some(Cost::Fuel),
            _ => None,
        }
    }

    /// Find this field's value in a remote object. Localized labels are tried before the
    /// camel-case name; the first non-null value wins.
    pub fn lookup(self, object: &Map<String, Value>) -> Option<&Value> {
        self.candidates(object).find(|value| !value.is_null())
    }

    /// Every value present for this field, in lookup order.
    pub fn candidates(self, object: &Map<String, Value>) -> impl Iterator<Item = &Value> {
        self.localized_labels()
            .iter()
            .copied()
            .chain(std::iter::once(self.wire_name()))
            .filter_map(|label| object.get(label))
    }
}

impl From<Cost> for Field {
    fn from(cost: Cost) -> Self {
        match cost {
            Cost::Guides => Field::GuidesCost,
            Cost::Commission => Field::CommissionCost,
            Cost::Ferry => Field::FerryCost,
            Cost::Cooler => Field::CoolerCost,
            Cost::Fuel => Field::FuelCost,
        }
    }
}

/// Text content of a remote value. Numbers are rendered, null and missing values are
/// empty.
pub fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Build a local record from one remote object.
pub fn decode(object: &Map<String, Value>) -> RevenueRecord {
    for key in object.keys() {
        if Field::from_label(key).is_none() {
            debug!("Ignoring unknown remote field {key:?}");
        }
    }

    let text = |field: Field| text_of(field.lookup(object));

    let mut record = RevenueRecord {
        date: parse_date(&text(Field::Date)),
        expedition: resolve_expedition(&text(Field::Expedition)),
        seller: text(Field::Seller),
        external_seller: text(Field::ExternalSeller),
        client_name: text(Field::ClientName),
        id_vehicle: text(Field::IdVehicle),
        observation: text(Field::Observation),
        package_value: Field::PackageValue
            .lookup(object)
            .map(coerce_json)
            .unwrap_or_default(),
        individual_value: Field::IndividualValue.lookup(object).map(coerce_json),
        // A blank or zero reference under one label falls through to the next
        row_number: Field::RowNumber
            .candidates(object)
            .find_map(RowNumber::from_json),
        ..RevenueRecord::default()
    };

    for cost in Cost::iter() {
        let amount = Field::from(cost)
            .lookup(object)
            .map(coerce_json)
            .unwrap_or_default();
        record.costs.set(cost, amount);
    }

    let status = text(Field::Status);
    record.status = if status.trim().is_empty() {
        Some(Status::Open)
    } else {
        Status::from_str(status.trim())
            .inspect_err(|_| warn!("Unknown remote status {status:?}"))
            .ok()
    };

    record
}

/// Encode a record for submission: every field under its camel-case name, plus the
/// derived free revenue and the create/update tag. `row_number` is only present when
/// the record has one.
pub fn encode(record: &RevenueRecord) -> Map<String, Value> {
    let mut object = Map::new();

    for field in Field::iter() {
        let value = match field {
            Field::Date => Value::from(record.date.map(format_input).unwrap_or_default()),
            Field::Expedition => Value::from(record.expedition.map(|e| e.id()).unwrap_or("")),
            Field::Seller => Value::from(record.seller.as_str()),
            Field::PackageValue => to_json(record.package_value),
            Field::IndividualValue => to_json(record.base_value()),
            Field::ClientName => Value::from(record.client_name.as_str()),
            Field::IdVehicle => Value::from(record.id_vehicle.as_str()),
            Field::GuidesCost
            | Field::CommissionCost
            | Field::FerryCost
            | Field::CoolerCost
            | Field::FuelCost => match field.cost() {
                Some(cost) => to_json(record.costs.get(cost)),
                None => Value::Null,
            },
            Field::ExternalSeller => Value::from(record.external_seller.as_str()),
            Field::Observation => Value::from(record.observation.as_str()),
            Field::Status => {
                let status: &'static str = record.status.map(Into::into).unwrap_or("");
                Value::from(status)
            }
            Field::RowNumber => match record.row_number {
                Some(row) => Value::from(row.get()),
                None => continue,
            },
        };
        object.insert(field.wire_name().to_string(), value);
    }

    object.insert(FREE_REVENUE_KEY.into(), to_json(record.free_revenue()));
    object.insert(
        OPERATION_KEY.into(),
        Value::from(record.operation().to_string()),
    );

    object
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;
    use crate::catalog::expedition;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_labels_round_trip() {
        for field in Field::iter() {
            assert_eq!(Field::from_label(field.wire_name()), Some(field));
            for label in field.localized_labels() {
                assert_eq!(Field::from_label(label), Some(field));
            }
        }
        assert_eq!(Field::from_label("Row Number"), Some(Field::RowNumber));
        assert_eq!(Field::from_label("Passeio"), Some(Field::Expedition));
        assert_eq!(Field::from_label("passeio"), None);
    }

    #[test]
    fn test_blank_row_number_falls_through() {
        let record = decode(&object(json!({ "row_number": "", "Row Number": 5 })));
        assert_eq!(record.row_number, RowNumber::new(5));

        let record = decode(&object(json!({ "row_number": 0, "Row Number": "7" })));
        assert_eq!(record.row_number, RowNumber::new(7));

        let record = decode(&object(json!({ "row_number": 3, "Row Number": 9 })));
        assert_eq!(record.row_number, RowNumber::new(3));
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(Field::IdVehicle.wire_name(), "idVehicle");
        assert_eq!(Field::CommissionCost.wire_name(), "commissionCost");
        assert_eq!(Field::RowNumber.wire_name(), "row_number");
    }

    #[test]
    fn test_decode_localized() {
        let record = decode(&object(json!({
            "Data de Entrada": "15/01/2025",
            "Passeio": "UTV 2L - 2 Horas / 2",
            "Vendedor Interno": "Rosinha",
            "Valor do Passeio": "1650",
            "Nome do Cliente": "Ana",
            "Custo Guia": 350,
            "Custo Comissão": "135",
            "Custo Balsa": "",
            "Custo Cooler": 45,
            "Custo Combustivel": "91.2",
            "Vendedor Externo": "Agência Sol",
            "ID Veiculo": "UTV-07",
            "Observação": "pago via pix",
            "STATUS": "ABERTO",
            "row_number": 12
        })));

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 1, 15));
        assert_eq!(record.expedition.unwrap().id(), "utv2L2h");
        assert_eq!(record.seller, "Rosinha");
        assert_eq!(record.package_value, dec!(1650));
        assert_eq!(record.individual_value, None);
        assert_eq!(record.costs.ferry, dec!(0));
        assert_eq!(record.costs.fuel, dec!(91.2));
        assert_eq!(record.external_seller, "Agência Sol");
        assert_eq!(record.id_vehicle, "UTV-07");
        assert_eq!(record.observation, "pago via pix");
        assert_eq!(record.status, Some(Status::Open));
        assert_eq!(record.row_number, RowNumber::new(12));
        assert_eq!(record.free_revenue(), dec!(1028.80));
    }

    #[test]
    fn test_decode_camel_case() {
        let record = decode(&object(json!({
            "date": "2025-02-01",
            "expedition": "utv4LIlhaAmor",
            "packageValue": 3200,
            "guidesCost": 400,
            "status": "FECHADO",
            "Row Number": "4"
        })));

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(record.expedition.unwrap().id(), "utv4LIlhaAmor");
        assert_eq!(record.free_revenue(), dec!(2800));
        assert_eq!(record.status, Some(Status::Closed));
        assert_eq!(record.row_number, RowNumber::new(4));
    }

    #[test]
    fn test_decode_defaults() {
        let record = decode(&object(json!({
            "Passeio": "Buggy 30",
            "Custo Guia": "muito",
            "STATUS": null
        })));

        assert_eq!(record.date, None);
        assert_eq!(record.expedition, None);
        assert_eq!(record.costs.guides, dec!(0));
        assert_eq!(record.status, Some(Status::Open));
        assert_eq!(record.row_number, None);
    }

    #[test]
    fn test_decode_unknown_status() {
        let record = decode(&object(json!({ "STATUS": "PENDENTE" })));
        assert_eq!(record.status, None);
    }

    #[test]
    fn test_encode_create() {
        let mut record = RevenueRecord::default();
        record.date = NaiveDate::from_ymd_opt(2025, 1, 15);
        record.select_expedition(expedition("utv2L2h").unwrap());
        record.costs.guides = dec!(350);
        record.costs.fuel = dec!(91.2);
        record.status = Some(Status::Open);
        record.client_name = "Ana".into();

        let payload = Value::Object(encode(&record));

        assert_eq!(payload["date"], json!("2025-01-15"));
        assert_eq!(payload["expedition"], json!("utv2L2h"));
        assert_eq!(payload["packageValue"], json!(1650.0));
        assert_eq!(payload["individualValue"], json!(1650.0));
        assert_eq!(payload["guidesCost"], json!(350.0));
        assert_eq!(payload["fuelCost"], json!(91.2));
        assert_eq!(payload["clientName"], json!("Ana"));
        assert_eq!(payload["status"], json!("ABERTO"));
        assert_eq!(payload["receitaLivre"], json!(1208.8));
        assert_eq!(payload["operation"], json!("create"));
        assert!(payload.get("row_number").is_none());
    }

    #[test]
    fn test_encode_update() {
        let mut record = RevenueRecord::default();
        record.row_number = RowNumber::new(9);

        let payload = encode(&record);

        assert_eq!(payload.get("row_number"), Some(&json!(9)));
        assert_eq!(payload.get("operation"), Some(&json!("update")));
        assert_eq!(payload.get("expedition"), Some(&json!("")));
        assert_eq!(payload.get("status"), Some(&json!("")));
    }
}
