//! E-mail submission of the contact form.
//!
//! The form is posted as JSON to the site's contact endpoint from a
//! background thread so the UI keeps animating while the request runs.

use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Contact form as expected by the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "servico")]
    pub service: String,
    #[serde(rename = "projeto")]
    pub project: String,
}

/// Endpoint reply.
#[derive(Debug, Deserialize)]
struct ContactResponse {
    ok: bool,
    #[serde(default)]
    erro: Option<String>,
}

/// Progress of an e-mail submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    /// The endpoint answered but refused the message.
    Rejected(Option<String>),
    /// No usable answer from the endpoint.
    ConnectionError,
}

impl SubmitStatus {
    /// Text for the confirmation panel.
    pub fn label(&self) -> &'static str {
        match self {
            SubmitStatus::Idle | SubmitStatus::Sending => "Sending e-mail...",
            SubmitStatus::Sent => "E-mail sent successfully!",
            SubmitStatus::Rejected(_) => "Sending failed, try another channel",
            SubmitStatus::ConnectionError => "Connection error",
        }
    }
}

/// Posts contact forms in the background and exposes the latest status.
#[derive(Debug)]
pub struct ContactSender {
    endpoint: String,
    timeout: Duration,
    status: Arc<RwLock<SubmitStatus>>,
}

impl ContactSender {
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        Self {
            endpoint,
            timeout,
            status: Arc::new(RwLock::new(SubmitStatus::Idle)),
        }
    }

    /// Start sending `request`; the status becomes `Sending` right away.
    pub fn submit(&self, request: ContactRequest) {
        set_status(&self.status, SubmitStatus::Sending);

        let endpoint = self.endpoint.clone();
        let timeout = self.timeout;
        let status = self.status.clone();

        thread::spawn(move || {
            let result = post_contact(&endpoint, timeout, &request);
            match &result {
                SubmitStatus::Sent => tracing::info!(%endpoint, "contact e-mail accepted"),
                SubmitStatus::Rejected(reason) => {
                    tracing::warn!(%endpoint, ?reason, "contact e-mail rejected")
                }
                _ => tracing::warn!(%endpoint, "contact endpoint unreachable"),
            }
            set_status(&status, result);
        });
    }

    /// Forget the last submission.
    pub fn reset(&self) {
        set_status(&self.status, SubmitStatus::Idle);
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
            .read()
            .map(|s| s.clone())
            .unwrap_or(SubmitStatus::ConnectionError)
    }
}

fn set_status(status: &Arc<RwLock<SubmitStatus>>, value: SubmitStatus) {
    if let Ok(mut s) = status.write() {
        *s = value;
    }
}

/// Post the form and classify the outcome.
fn post_contact(endpoint: &str, timeout: Duration, request: &ContactRequest) -> SubmitStatus {
    let agent = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .new_agent();

    let response: Result<ContactResponse, ureq::Error> = agent
        .post(endpoint)
        .send_json(request)
        .and_then(|mut r| r.body_mut().read_json());

    match response {
        Ok(reply) => status_from_reply(reply),
        Err(e) => {
            tracing::debug!(error = %e, "contact request failed");
            SubmitStatus::ConnectionError
        }
    }
}

fn status_from_reply(reply: ContactResponse) -> SubmitStatus {
    if reply.ok {
        SubmitStatus::Sent
    } else {
        SubmitStatus::Rejected(reply.erro)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::time::Instant;

    fn request() -> ContactRequest {
        ContactRequest {
            name: "Ana".to_string(),
            service: "Website".to_string(),
            project: "A portfolio site".to_string(),
        }
    }

    /// Serve one canned JSON reply and hand back the request body.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api/contato", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut content_length = 0;
            let mut chunked = false;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    } else if name.eq_ignore_ascii_case("transfer-encoding") {
                        chunked = value.trim().eq_ignore_ascii_case("chunked");
                    }
                }
            }
            let received = if chunked {
                read_chunked(&mut reader)
            } else {
                let mut received = vec![0; content_length];
                reader.read_exact(&mut received).unwrap();
                received
            };

            let mut stream = stream;
            write!(
                stream,
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            String::from_utf8(received).unwrap()
        });

        (url, handle)
    }

    fn read_chunked(reader: &mut impl BufRead) -> Vec<u8> {
        let mut body = Vec::new();
        loop {
            let mut size = String::new();
            reader.read_line(&mut size).unwrap();
            let size = usize::from_str_radix(size.trim(), 16).unwrap();
            let mut chunk = vec![0; size + 2];
            reader.read_exact(&mut chunk).unwrap();
            if size == 0 {
                return body;
            }
            body.extend_from_slice(&chunk[..size]);
        }
    }

    #[test]
    fn test_request_uses_endpoint_field_names() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["nome"], "Ana");
        assert_eq!(json["servico"], "Website");
        assert_eq!(json["projeto"], "A portfolio site");
    }

    #[test]
    fn test_status_from_reply() {
        let ok: ContactResponse = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert_eq!(status_from_reply(ok), SubmitStatus::Sent);

        let refused: ContactResponse =
            serde_json::from_str(r#"{"ok": false, "erro": "Dados inválidos"}"#).unwrap();
        assert_eq!(
            status_from_reply(refused),
            SubmitStatus::Rejected(Some("Dados inválidos".to_string()))
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(SubmitStatus::Sending.label(), "Sending e-mail...");
        assert_eq!(SubmitStatus::Sent.label(), "E-mail sent successfully!");
        assert_eq!(
            SubmitStatus::Rejected(None).label(),
            "Sending failed, try another channel"
        );
        assert_eq!(SubmitStatus::ConnectionError.label(), "Connection error");
    }

    #[test]
    fn test_post_accepted() {
        let (url, server) = serve_once("HTTP/1.1 200 OK", r#"{"ok": true}"#);
        let status = post_contact(&url, Duration::from_secs(5), &request());
        assert_eq!(status, SubmitStatus::Sent);

        let body: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(body["nome"], "Ana");
        assert_eq!(body["projeto"], "A portfolio site");
    }

    #[test]
    fn test_post_rejected_with_error_status() {
        let (url, server) = serve_once(
            "HTTP/1.1 422 Unprocessable Entity",
            r#"{"ok": false, "erro": "Nome e projeto são obrigatórios"}"#,
        );
        let status = post_contact(&url, Duration::from_secs(5), &request());
        server.join().unwrap();
        assert!(matches!(status, SubmitStatus::Rejected(Some(_))));
    }

    #[test]
    fn test_post_without_server() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api/contato", listener.local_addr().unwrap());
        drop(listener);

        let status = post_contact(&url, Duration::from_secs(2), &request());
        assert_eq!(status, SubmitStatus::ConnectionError);
    }

    #[test]
    fn test_sender_reports_result() {
        let (url, server) = serve_once("HTTP/1.1 200 OK", r#"{"ok": true}"#);
        let sender = ContactSender::new(url, Duration::from_secs(5));
        sender.submit(request());

        let deadline = Instant::now() + Duration::from_secs(5);
        while sender.status() == SubmitStatus::Sending && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        server.join().unwrap();
        assert_eq!(sender.status(), SubmitStatus::Sent);

        sender.reset();
        assert_eq!(sender.status(), SubmitStatus::Idle);
    }
}
