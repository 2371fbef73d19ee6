use routedoc::ShapeDescriptor;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, ShapeDescriptor)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct Order {
    order_id: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    lines: Vec<OrderLine>,
    #[serde(with = "status_text")]
    status: Status,
}

#[derive(Serialize, Deserialize, ShapeDescriptor)]
struct OrderLine {
    #[serde(rename(serialize = "sku"))]
    sku: String,
    quantity: u32,
}

#[derive(Serialize, Deserialize, ShapeDescriptor)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum Status {
    Open,
    Shipped,
}

mod status_text {
    use super::Status;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(status: &Status, serializer: S) -> Result<S::Ok, S::Error> {
        status.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Status, D::Error> {
        Status::deserialize(deserializer)
    }
}

fn main() {
    let mut generator = routedoc::SchemaGenerator::default();
    assert!(generator.generate::<Order>().is_ok());
}
