use routedoc::{Document, ShapeDescriptor};

/// Credentials used to open a session
#[derive(ShapeDescriptor)]
#[shape(name = "Login", rename_all = "kebab-case")]
struct LoginRequest {
    user_name: String,
    #[shape(skip)]
    remember: bool,
    #[shape(rename = "secret")]
    password: String,
}

fn main() {
    let mut api = Document::new("Auth");
    api.route("/login")
        .post()
        .summary("Open session")
        .body::<LoginRequest>()
        .response::<()>(204);
    assert!(api.schemas().contains_key("Login"));
}
