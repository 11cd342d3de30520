use serde::Serializer;

/// Serialize a payload as its length, keeping texture and graphic blobs out of reports
pub(crate) fn byte_len<T, S>(data: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<[u8]>,
    S: Serializer,
{
    serializer.serialize_u64(data.as_ref().len() as u64)
}

#[cfg(test)]
mod test {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Blob {
        #[serde(serialize_with = "super::byte_len")]
        data: Vec<u8>,
    }

    #[test]
    fn payload_as_length() {
        let blob = Blob { data: vec![0; 0x1800] };

        assert_eq!(
            serde_json::to_string(&blob).unwrap(),
            r#"{"data":6144}"#
        );
    }
}
