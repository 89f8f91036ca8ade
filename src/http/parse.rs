use crate::http::method::Method;
use crate::http::request::Request;
use crate::http::{BUFFER_SIZE, Response};
use anyhow::{Context, anyhow, bail};
use std::cmp::min;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};
use std::str::FromStr;

pub fn read_request(readable: &mut impl Read) -> anyhow::Result<Request> {
    let mut rdr = BufReader::new(readable);

    let mut first_line = String::new();
    rdr.read_line(&mut first_line)
        .context("Error while reading line")?;
    let first_line = first_line.trim_ascii();

    let first_line_parts: Vec<&str> = first_line.split(' ').collect();

    let (method, url) = match first_line_parts[..] {
        [method_raw, target, version] => {
            let method = Method::from_str(method_raw).context("Unknown HTTP method")?;

            if !version.eq("HTTP/1.1") {
                bail!("Unsupported HTTP version");
            }

            (method, String::from(target))
        }
        _ => bail!("Bad start-line"),
    };

    let mut headers: HashMap<String, String> = HashMap::new();
    let mut line = String::new();

    loop {
        line.clear();
        let n = rdr.read_line(&mut line).context("Can't read line")?;

        if n == 0 || line.trim_ascii().is_empty() {
            break;
        }

        let (k, v) = line
            .trim_ascii()
            .split_once(':')
            .ok_or(anyhow!("Invalid header"))?;
        headers.insert(k.trim_ascii().to_lowercase(), String::from(v.trim_ascii()));
    }

    let content = if let Some(content_length_raw) = headers.get("content-length") {
        let content_length: usize = content_length_raw
            .parse()
            .context("Invalid header value")?;
        read_content(&mut rdr, content_length)?
    } else {
        Vec::default()
    };

    Ok(Request {
        method,
        url,
        headers,
        content,
    })
}

fn read_content(
    rdr: &mut BufReader<&mut impl Read>,
    mut content_length: usize,
) -> anyhow::Result<Vec<u8>> {
    let mut content = Vec::with_capacity(content_length);
    let mut buf = [0u8; BUFFER_SIZE];
    while content_length > 0 {
        let slice_to_read = &mut buf[..min(BUFFER_SIZE, content_length)];

        let bytes_read = rdr
            .read(slice_to_read)
            .context("Error while reading content")?;
        if bytes_read == 0 {
            break;
        }
        content.extend_from_slice(&slice_to_read[..bytes_read]);
        content_length -= bytes_read;
    }
    Ok(content)
}

pub fn serialize_response(response: &Response) -> Vec<u8> {
    let content_len = response.content.as_ref().map(|c| c.len()).unwrap_or(0);
    let mut resp_bytes = Vec::with_capacity(content_len + response.headers.len() * 32);

    resp_bytes.extend(
        format!(
            "HTTP/1.1 {} {}\r\n",
            response.status.code_num, response.status.message
        )
        .as_bytes(),
    );

    for (key, value) in &response.headers {
        resp_bytes.extend(format!("{}: {}\r\n", key, value).as_bytes());
    }

    if let Some(c) = &response.content {
        resp_bytes.extend(format!("Content-Length: {}\r\n", c.len()).as_bytes());
        resp_bytes.extend(b"\r\n");
        resp_bytes.extend(c);
    } else {
        resp_bytes.extend(b"\r\n");
    }

    resp_bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::status::Status;
    use serde_json::json;

    fn read(raw: &str) -> anyhow::Result<Request> {
        let mut bytes = raw.as_bytes();
        read_request(&mut bytes)
    }

    #[test]
    fn reads_post_with_body() {
        let req = read(
            "POST /api/login HTTP/1.1\r\nHost: localhost\r\nContent-Length: 20\r\n\r\n{\"username\":\"alice\"}",
        )
        .unwrap();

        assert_eq!(req.method, Method::POST);
        assert_eq!(req.url, "/api/login");
        assert_eq!(req.get_header("host"), Some("localhost"));
        assert_eq!(req.content, br#"{"username":"alice"}"#);
    }

    #[test]
    fn short_body_keeps_only_received_bytes() {
        let req = read("POST /records HTTP/1.1\r\nContent-Length: 10\r\n\r\n{}").unwrap();
        assert_eq!(req.content, b"{}");
    }

    #[test]
    fn missing_length_means_no_body() {
        let req = read("GET /users HTTP/1.1\r\n\r\n").unwrap();
        assert!(req.content.is_empty());
    }

    #[test]
    fn unknown_verb_is_accepted() {
        let req = read("PURGE /records HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(req.method, Method::Other("PURGE".to_string()));
    }

    #[test]
    fn rejects_bad_start_line() {
        assert!(read("GET /users\r\n\r\n").is_err());
        assert!(read("GET /users HTTP/1.0\r\n\r\n").is_err());
    }

    #[test]
    fn rejects_bad_header() {
        assert!(read("GET /users HTTP/1.1\r\nnot-a-header\r\n\r\n").is_err());
    }

    #[test]
    fn rejects_bad_content_length() {
        assert!(read("POST /records HTTP/1.1\r\nContent-Length: lots\r\n\r\n").is_err());
    }

    #[test]
    fn serializes_status_headers_and_body() {
        let mut resp = Response::json(Status::CREATED, json!({ "success": true }));
        resp.headers
            .insert("Content-Type".to_string(), "application/json".to_string());

        let text = String::from_utf8(serialize_response(&resp)).unwrap();
        assert!(text.starts_with("HTTP/1.1 201 Created\r\n"));
        assert!(text.contains("Content-Type: application/json\r\n"));
        assert!(text.ends_with("Content-Length: 16\r\n\r\n{\"success\":true}"));
    }

    #[test]
    fn serializes_without_body() {
        let resp = crate::http::bad_request();
        let text = String::from_utf8(serialize_response(&resp)).unwrap();
        assert_eq!(text, "HTTP/1.1 400 Bad Request\r\n\r\n");
    }
}
