use routedoc::ShapeDescriptor;

#[derive(ShapeDescriptor)]
struct Envelope<T, M>
where
    M: Clone,
{
    data: T,
    meta: Option<M>,
}

#[derive(ShapeDescriptor)]
struct Pair(String, u8);

#[derive(ShapeDescriptor)]
struct Wrapper<T>(Vec<T>);

#[derive(ShapeDescriptor)]
struct Marker;

#[derive(ShapeDescriptor)]
struct Keyword {
    r#type: String,
}

fn main() {
    let mut generator = routedoc::SchemaGenerator::default();
    generator.generate::<Envelope<Pair, String>>().unwrap();
    generator.generate::<Wrapper<Marker>>().unwrap();
    generator.generate::<Keyword>().unwrap();
    assert!(generator.get("Envelope_Pair_String").is_some());
    assert!(generator.get("Keyword").unwrap().properties.contains_key("type"));
}
