/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use bytes::Bytes;
use http::{HeaderMap, HeaderValue};
use std::error::Error;
use std::pin::Pin;
use std::task::{Context, Poll};

type BodyError = Box<dyn Error + Send + Sync>;

/// SdkBody type
///
/// This is the Body used for dispatching all HTTP Requests.
/// For handling responses, the type of the body will be controlled
/// by the HTTP stack.
#[derive(Debug)]
pub enum SdkBody {
    Once(Option<Bytes>),
}

impl SdkBody {
    /// An empty body. Readers see end-of-stream immediately.
    pub fn empty() -> Self {
        SdkBody::Once(None)
    }

    /// The in-memory contents of this body, if it has not been consumed yet.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            SdkBody::Once(Some(bytes)) => Some(bytes.as_ref()),
            SdkBody::Once(None) => Some(&[][..]),
        }
    }

    pub fn try_clone(&self) -> Option<SdkBody> {
        match self {
            SdkBody::Once(bytes) => Some(SdkBody::Once(bytes.clone())),
        }
    }

    fn poll_inner(&mut self) -> Poll<Option<Result<Bytes, BodyError>>> {
        match self {
            SdkBody::Once(ref mut opt) => match opt.take() {
                Some(bytes) => Poll::Ready(Some(Ok(bytes))),
                None => Poll::Ready(None),
            },
        }
    }
}

impl Default for SdkBody {
    fn default() -> Self {
        SdkBody::empty()
    }
}

impl From<&str> for SdkBody {
    fn from(s: &str) -> Self {
        SdkBody::Once(Some(Bytes::copy_from_slice(s.as_bytes())))
    }
}

impl From<String> for SdkBody {
    fn from(s: String) -> Self {
        SdkBody::from(Bytes::from(s))
    }
}

impl From<Bytes> for SdkBody {
    fn from(bytes: Bytes) -> Self {
        SdkBody::Once(Some(bytes))
    }
}

impl From<Vec<u8>> for SdkBody {
    fn from(data: Vec<u8>) -> SdkBody {
        Self::from(Bytes::from(data))
    }
}

impl http_body::Body for SdkBody {
    type Data = Bytes;
    type Error = BodyError;

    fn poll_data(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Self::Data, Self::Error>>> {
        self.poll_inner()
    }

    fn poll_trailers(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Result<Option<HeaderMap<HeaderValue>>, Self::Error>> {
        Poll::Ready(Ok(None))
    }

    fn is_end_stream(&self) -> bool {
        matches!(self, SdkBody::Once(None))
    }
}

#[cfg(test)]
mod test {
    use crate::body::SdkBody;
    use http_body::Body;

    #[tokio::test]
    async fn once_body_yields_its_bytes_a_single_time() {
        let mut body = SdkBody::from("hello");
        assert_eq!(body.bytes(), Some("hello".as_bytes()));
        let chunk = body.data().await.expect("one chunk").expect("no error");
        assert_eq!(chunk.as_ref(), b"hello");
        assert!(body.data().await.is_none());
        assert!(body.is_end_stream());
    }

    #[test]
    fn clone_keeps_contents() {
        let body = SdkBody::from(vec![1_u8, 2, 3]);
        let cloned = body.try_clone().expect("in-memory bodies are cloneable");
        assert_eq!(cloned.bytes(), Some(&[1_u8, 2, 3][..]));
    }
}
