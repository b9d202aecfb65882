//! Sort transfer failures into retryable and final.

use super::policy::ErrorKind;
use crate::transfer::TransferErrorKind;

pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 | 500..=599 => ErrorKind::ServerBusy(code),
        _ => ErrorKind::Final,
    }
}

pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Final
}

pub fn classify(e: &TransferErrorKind) -> ErrorKind {
    match e {
        TransferErrorKind::Curl(ce) => classify_curl_error(ce),
        TransferErrorKind::Timeout => ErrorKind::Timeout,
        TransferErrorKind::Http(code) => classify_http_status(*code),
        TransferErrorKind::Io(_) | TransferErrorKind::Cancelled => ErrorKind::Final,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_origin_is_retryable() {
        assert_eq!(classify_http_status(429), ErrorKind::ServerBusy(429));
        assert_eq!(classify_http_status(503), ErrorKind::ServerBusy(503));
        assert_eq!(classify_http_status(502), ErrorKind::ServerBusy(502));
    }

    #[test]
    fn not_found_and_local_failures_are_final() {
        assert_eq!(classify(&TransferErrorKind::Http(404)), ErrorKind::Final);
        assert_eq!(classify(&TransferErrorKind::Cancelled), ErrorKind::Final);
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert_eq!(classify(&TransferErrorKind::Io(io)), ErrorKind::Final);
        assert_eq!(classify(&TransferErrorKind::Timeout), ErrorKind::Timeout);
    }
}
