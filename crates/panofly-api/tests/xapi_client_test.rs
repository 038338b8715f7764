#![allow(clippy::unwrap_used)]
// Integration tests for `HttpXapiClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use panofly_api::xpath::{Xpath, as_entry_xpath, template_prefix};
use panofly_api::{
    Credentials, Error, HttpXapiClient, ImportKind, ProtocolVersion, ReadMode, TransportConfig,
    XapiClient,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, HttpXapiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = HttpXapiClient::with_client(reqwest::Client::new(), base_url)
        .with_version(ProtocolVersion::new(9, 0, 0));
    (server, client)
}

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_owned(), "application/xml")
}

fn success(result: &str) -> ResponseTemplate {
    xml(&format!(
        r#"<response status="success" code="19"><result>{result}</result></response>"#
    ))
}

fn done() -> ResponseTemplate {
    xml(r#"<response status="success" code="20"><msg>command succeeded</msg></response>"#)
}

fn ethernet_path(names: &[&str]) -> Xpath {
    template_prefix("tmpl1", "").join([
        "config".to_owned(),
        "devices".to_owned(),
        as_entry_xpath(&["localhost.localdomain"]),
        "network".to_owned(),
        "interface".to_owned(),
        "ethernet".to_owned(),
        as_entry_xpath(names),
    ])
}

// ── Session tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_connect_with_api_key_negotiates_version() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("type", "version"))
        .and(header("X-PAN-KEY", "secret-key"))
        .respond_with(success(
            "<sw-version>9.1.3-h1</sw-version><model>Panorama</model><multi-vsys>on</multi-vsys>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = Credentials::ApiKey("secret-key".to_string().into());
    let client = HttpXapiClient::connect(
        Url::parse(&server.uri()).unwrap(),
        &credentials,
        &TransportConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(
        client.version(),
        ProtocolVersion::new(9, 1, 3).with_suffix("h1")
    );
    assert_eq!(
        client.system_info().unwrap().model.as_deref(),
        Some("Panorama")
    );
}

#[tokio::test]
async fn test_connect_with_password_runs_keygen() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("type", "keygen"))
        .and(query_param("user", "admin"))
        .respond_with(success("<key>generated</key>"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("type", "version"))
        .and(header("X-PAN-KEY", "generated"))
        .respond_with(success("<sw-version>8.1.0</sw-version>"))
        .mount(&server)
        .await;

    let credentials = Credentials::Password {
        username: "admin".into(),
        password: "hunter2".to_string().into(),
    };
    let client = HttpXapiClient::connect(
        Url::parse(&server.uri()).unwrap(),
        &credentials,
        &TransportConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(client.version(), ProtocolVersion::new(8, 1, 0));
}

#[tokio::test]
async fn test_keygen_rejection_is_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("type", "keygen"))
        .respond_with(xml(
            r#"<response status="error"><result><msg>Invalid credentials.</msg></result></response>"#,
        ))
        .mount(&server)
        .await;

    let credentials = Credentials::Password {
        username: "admin".into(),
        password: "wrong".to_string().into(),
    };
    let result = HttpXapiClient::connect(
        Url::parse(&server.uri()).unwrap(),
        &credentials,
        &TransportConfig::default(),
    )
    .await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error"
    );
}

// ── Config read tests ───────────────────────────────────────────────

#[tokio::test]
async fn test_read_returns_result_payload() {
    let (server, client) = setup().await;
    let xpath = ethernet_path(&["ethernet1/1"]);

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("type", "config"))
        .and(query_param("action", "show"))
        .and(query_param("xpath", xpath.to_string()))
        .respond_with(xml(
            r#"<response status="success"><result total-count="1" count="1">
                 <entry name="ethernet1/1"><layer3/><comment>uplink &amp; core</comment></entry>
               </result></response>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.read(ReadMode::Show, &xpath).await.unwrap();
    assert_eq!(
        result,
        json!({
            "@total-count": "1",
            "@count": "1",
            "entry": { "@name": "ethernet1/1", "layer3": {}, "comment": "uplink & core" }
        })
    );
}

#[tokio::test]
async fn test_read_without_result_is_null() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("action", "get"))
        .respond_with(xml(r#"<response status="success" code="7"/>"#))
        .mount(&server)
        .await;

    let result = client
        .read(ReadMode::Get, &ethernet_path(&[]))
        .await
        .unwrap();
    assert!(result.is_null());
}

#[tokio::test]
async fn test_error_envelope_maps_to_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/"))
        .and(query_param("action", "set"))
        .respond_with(xml(
            r#"<response status="error" code="12"><msg><line><![CDATA[ ethernet1/1 -> layer3 unexpected here]]></line></msg></response>"#,
        ))
        .mount(&server)
        .await;

    let err = client
        .set(&ethernet_path(&[]).strip(1), json!({ "entry": { "@name": "ethernet1/1" } }))
        .await
        .unwrap_err();

    match err {
        Error::Api { code, message } => {
            assert_eq!(code, Some(12));
            assert_eq!(message, "ethernet1/1 -> layer3 unexpected here");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_forbidden_is_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let result = client.read(ReadMode::Get, &ethernet_path(&[])).await;
    assert!(matches!(result, Err(Error::Authentication { .. })));
}

#[tokio::test]
async fn test_garbage_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = client.read(ReadMode::Get, &ethernet_path(&[])).await;
    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

#[tokio::test]
async fn test_json_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": { "@status": "success", "result": {} }
        })))
        .mount(&server)
        .await;

    let result = client.read(ReadMode::Get, &ethernet_path(&[])).await;
    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

// ── Config write tests ──────────────────────────────────────────────

#[tokio::test]
async fn test_set_sends_element_as_xml() {
    let (server, client) = setup().await;
    let element = json!({
        "entry": { "@name": "ethernet1/1", "comment": "uplink", "layer3": { "mtu": "1500" } }
    });

    Mock::given(method("POST"))
        .and(path("/api/"))
        .and(query_param("type", "config"))
        .and(query_param("action", "set"))
        .and(query_param(
            "element",
            r#"<entry name="ethernet1/1"><comment>uplink</comment><layer3><mtu>1500</mtu></layer3></entry>"#,
        ))
        .respond_with(done())
        .expect(1)
        .mount(&server)
        .await;

    client
        .set(&ethernet_path(&["ethernet1/1"]).strip(1), element)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_uses_delete_action() {
    let (server, client) = setup().await;
    let xpath = ethernet_path(&["ethernet1/1", "ethernet1/2"]);

    Mock::given(method("POST"))
        .and(path("/api/"))
        .and(query_param("action", "delete"))
        .and(query_param("xpath", xpath.to_string()))
        .respond_with(done())
        .expect(1)
        .mount(&server)
        .await;

    client.delete(&xpath).await.unwrap();
}

// ── Vsys import tests ───────────────────────────────────────────────

#[tokio::test]
async fn test_unimport_deletes_member_predicate_across_vsys() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/"))
        .and(query_param("action", "delete"))
        .and(query_param(
            "xpath",
            "/config/devices/entry[@name='localhost.localdomain']/template/entry[@name='tmpl1']\
             /config/devices/entry[@name='localhost.localdomain']/vsys/entry/import/network\
             /interface/member[text()='ethernet1/1' or text()='ethernet1/2']",
        ))
        .respond_with(done())
        .expect(1)
        .mount(&server)
        .await;

    client
        .vsys_unimport(
            ImportKind::Interface,
            "tmpl1",
            "",
            &["ethernet1/1".into(), "ethernet1/2".into()],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unimport_of_absent_member_succeeds() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/"))
        .and(query_param("action", "delete"))
        .respond_with(xml(
            r#"<response status="error" code="7"><msg>Object doesn't exist</msg></response>"#,
        ))
        .mount(&server)
        .await;

    client
        .vsys_unimport(ImportKind::Interface, "tmpl1", "", &["ethernet1/1".into()])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_import_sets_member_list() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/"))
        .and(query_param("action", "set"))
        .and(query_param(
            "xpath",
            "/config/devices/entry[@name='localhost.localdomain']/template-stack/entry[@name='stack1']\
             /config/devices/entry[@name='localhost.localdomain']/vsys/entry[@name='vsys2']\
             /import/network/interface",
        ))
        .and(query_param("element", "<member>tunnel.7</member>"))
        .respond_with(done())
        .expect(1)
        .mount(&server)
        .await;

    client
        .vsys_import(ImportKind::Interface, "", "stack1", "vsys2", &["tunnel.7".into()])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_import_with_no_names_sends_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(done())
        .expect(0)
        .mount(&server)
        .await;

    client
        .vsys_import(ImportKind::Interface, "tmpl1", "", "vsys1", &[])
        .await
        .unwrap();
    client
        .vsys_unimport(ImportKind::Interface, "tmpl1", "", &[])
        .await
        .unwrap();
}
