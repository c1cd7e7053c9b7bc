use super::*;

#[test]
fn url_joins_base_and_path_without_double_slash() {
    let request = ApiRequest::get("/drives/drives/");
    assert_eq!(request.url("http://127.0.0.1:8000/"), "http://127.0.0.1:8000/drives/drives/");
}

#[test]
fn url_appends_encoded_query_pairs() {
    let request = ApiRequest::get("/drives/drives/")
        .query("upcoming", "true")
        .query("q", "grade 5&6");
    assert_eq!(
        request.url("http://api.test"),
        "http://api.test/drives/drives/?upcoming=true&q=grade%205%266"
    );
}

#[test]
fn url_percent_encodes_non_ascii_query_values() {
    let request = ApiRequest::get("/drives/drives/").query("name", "Émile/Polio");
    assert_eq!(request.url("http://api.test"), "http://api.test/drives/drives/?name=%C3%89mile%2FPolio");
}

#[test]
fn set_header_replaces_case_insensitively() {
    let mut request = ApiRequest::get("/x").header("authorization", "Bearer old");
    request.set_header("Authorization", "Bearer new");
    assert_eq!(request.headers.len(), 1);
    assert_eq!(request.header_value("AUTHORIZATION"), Some("Bearer new"));
}

#[test]
fn public_requests_opt_out_of_authorization() {
    assert!(ApiRequest::post("/auth/login/").authenticated);
    assert!(!ApiRequest::post("/auth/login/").public().authenticated);
}

#[test]
fn response_json_treats_empty_body_as_null() {
    let response = ApiResponse::new(204);
    let decoded: Option<Value> = response.json().unwrap();
    assert_eq!(decoded, None);
}

#[test]
fn response_header_lookup_ignores_case() {
    let response = ApiResponse::new(200).with_header("Content-Disposition", "attachment");
    assert_eq!(response.header("content-disposition"), Some("attachment"));
    assert!(response.is_success());
    assert!(!ApiResponse::new(401).is_success());
}
