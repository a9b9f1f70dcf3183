use http::{Method, Request};
use std::io::Write;
use tempfile::NamedTempFile;
use treebridge::routes_file::{load_router, RouteTable};

fn write_table(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_router_from_yaml() {
    let file = write_table(
        ".yaml",
        r#"
routes:
  - path: /pets
    middleware: list_pets
    methods: [GET]
  - path: /pets
    middleware: add_pet
    methods: [POST]
  - path: /pets/:id
    middleware: get_pet
    methods: GET
    name: pet
    options:
      constraints: { id: '\d+' }
  - path: /health
    middleware: health
"#,
    );
    let router = load_router(file.path()).unwrap();

    let list = router.match_request(&Request::get("/pets").body(()).unwrap());
    assert_eq!(list.matched_middleware(), Some("list_pets"));

    let add = router.match_request(&Request::post("/pets").body(()).unwrap());
    assert_eq!(add.matched_middleware(), Some("add_pet"));

    let pet = router.match_request(&Request::get("/pets/9").body(()).unwrap());
    assert_eq!(pet.matched_route_name(), Some("pet"));

    let health = router.match_request(&Request::head("/health").body(()).unwrap());
    assert_eq!(health.matched_route_name(), Some("/health"));

    let delete = router.match_request(&Request::delete("/pets").body(()).unwrap());
    assert!(delete.is_method_failure());
    assert_eq!(delete.allowed_methods(), &[Method::GET, Method::POST]);
}

#[test]
fn test_load_router_from_json() {
    let file = write_table(
        ".json",
        r#"{ "routes": [ { "path": "/a/:b", "middleware": "a", "methods": ["PUT"], "name": "a" } ] }"#,
    );
    let router = load_router(file.path()).unwrap();
    let mut params = serde_json::Map::new();
    params.insert("b".to_string(), serde_json::json!("c"));
    assert_eq!(router.generate_uri("a", &params).unwrap(), "/a/c");
}

#[test]
fn test_missing_file_and_bad_routes_are_errors() {
    assert!(RouteTable::from_path(std::path::Path::new("/nonexistent/routes.yaml")).is_err());

    let bad = write_table(
        ".yaml",
        "routes:\n  - { path: '/x[', middleware: x, methods: [GET] }\n",
    );
    let err = load_router(bad.path()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to register routes"));
}

#[test]
fn test_empty_table() {
    let file = write_table(".yml", "routes: []\n");
    let router = load_router(file.path()).unwrap();
    assert!(router.stack().is_empty());
}
