#[cfg(test)]
mod test {
    use crate::de::{self, Deserializer};
    use crate::ser::{self, Serializer};
    use crate::value::{Value, U256};
    use crate::CodecError;
    use anyhow::Result;
    use itertools::Itertools;
    use rand::seq::SliceRandom;

    fn gen_scalars() -> Vec<Value> {
        vec![
            Value::Unit,
            Value::Bool(true),
            Value::Bool(false),
            Value::U8(0xab),
            Value::U16(0xabcd),
            Value::U32(0xdeadbeef),
            Value::U64(u64::MAX),
            Value::U128(u128::MAX - 1),
            Value::U256(U256::new(5, 1)),
            Value::I8(-1),
            Value::I16(-2),
            Value::I32(i32::MIN),
            Value::I64(-64),
            Value::I128(i128::MIN),
            Value::F32(1.5),
            Value::F64(-0.25),
            Value::Char('é'),
        ]
    }

    fn gen_composites() -> Vec<Value> {
        vec![
            Value::Str(String::from("asdf")),
            Value::Bytes(vec![0x61, 0x62, 0x63]),
            Value::Option(None),
            Value::Option(Some(Box::new(Value::U64(7)))),
            Value::Seq(vec![Value::U8(1), Value::U8(2), Value::U8(3)]),
            Value::Tuple(vec![Value::Bool(true), Value::Str(String::from("zxcv"))]),
            Value::Variant {
                index: 2,
                payload: Box::new(Value::Tuple(vec![Value::U32(9)])),
            },
            Value::Struct(vec![
                Value::U64(1),
                Value::Str(String::from("field")),
                Value::Seq(vec![Value::Bool(false)]),
            ]),
            Value::Map(vec![
                (Value::U8(2), Value::Str(String::from("two"))),
                (Value::U8(1), Value::Str(String::from("one"))),
            ]),
        ]
    }

    /// Structural mirror of `Serializer::write_value` for the shapes the
    /// generators above produce. BCS carries no type information, so the
    /// decode side must know the shape it expects.
    fn read_back(de: &mut Deserializer, shape: &Value) -> crate::Result<Value> {
        let value = match shape {
            Value::Unit => Value::Unit,
            Value::Bool(_) => Value::Bool(de.read_bool()?),
            Value::U8(_) => Value::U8(de.read_u8()?),
            Value::U16(_) => Value::U16(de.read_u16()?),
            Value::U32(_) => Value::U32(de.read_u32()?),
            Value::U64(_) => Value::U64(de.read_u64()?),
            Value::U128(_) => Value::U128(de.read_u128()?),
            Value::U256(_) => Value::U256(de.read_u256()?),
            Value::I8(_) => Value::I8(de.read_i8()?),
            Value::I16(_) => Value::I16(de.read_i16()?),
            Value::I32(_) => Value::I32(de.read_i32()?),
            Value::I64(_) => Value::I64(de.read_i64()?),
            Value::I128(_) => Value::I128(de.read_i128()?),
            Value::F32(_) => Value::F32(de.read_f32()?),
            Value::F64(_) => Value::F64(de.read_f64()?),
            Value::Char(_) => Value::Char(de.read_char()?),
            Value::Str(_) => Value::Str(de.read_str()?),
            Value::Bytes(_) => Value::Bytes(de.read_bytes()?),
            Value::Option(opt) => {
                let payload_shape = opt.as_deref();
                let decoded = de.read_option(|de| {
                    let shape = payload_shape.expect("generator Some options carry a shape");
                    read_back(de, shape)
                })?;
                Value::Option(decoded.map(Box::new))
            }
            Value::Seq(elems) => {
                let elem_shape = elems.first().expect("generator seqs are non-empty");
                Value::Seq(de.read_seq(|de| read_back(de, elem_shape))?)
            }
            Value::Tuple(members) => {
                let mut out = Vec::with_capacity(members.len());
                for member in members {
                    out.push(read_back(de, member)?);
                }
                Value::Tuple(out)
            }
            Value::Struct(members) => {
                let mut out = Vec::with_capacity(members.len());
                for member in members {
                    out.push(read_back(de, member)?);
                }
                Value::Struct(out)
            }
            Value::Map(entries) => {
                let (key_shape, value_shape) =
                    entries.first().expect("generator maps are non-empty");
                Value::Map(de.read_map(
                    |de| read_back(de, key_shape),
                    |de| read_back(de, value_shape),
                )?)
            }
            Value::Variant { index: _, payload } => {
                let index = de.read_variant_index(u32::MAX)?;
                Value::Variant {
                    index,
                    payload: Box::new(read_back(de, payload)?),
                }
            }
        };
        Ok(value)
    }

    /// Round-trip `value` and assert its re-encoding is byte-identical.
    /// Map shapes compare against their canonically-reordered form.
    fn verify(value: &Value) -> Result<()> {
        let encoded = ser::to_bytes(value)?;

        let decoded = de::from_bytes(&encoded, |de| read_back(de, value))?;
        let re_encoded = ser::to_bytes(&decoded)?;
        assert_eq!(encoded, re_encoded, "\n{:?}\n{:?}\n", value, decoded);

        match (value, &decoded) {
            // Map entries come back in canonical order, not insertion order.
            (Value::Map(_), Value::Map(_)) => {}
            _ => assert_eq!(value, &decoded),
        }

        Ok(())
    }

    #[test]
    fn round_trip_every_shape() -> Result<()> {
        for value in gen_scalars().iter().chain(gen_composites().iter()) {
            verify(value)?;
        }
        Ok(())
    }

    #[test]
    fn round_trip_tuples_of_shapes() -> Result<()> {
        let mut rand_rng = rand::thread_rng();
        let pool = gen_scalars();

        for mut picked in pool.iter().cloned().combinations(3) {
            verify(&Value::Tuple(picked.clone()))?;

            picked.shuffle(&mut rand_rng);
            verify(&Value::Tuple(picked))?;
        }
        Ok(())
    }

    #[test]
    fn known_scalar_encodings() -> Result<()> {
        assert_eq!(ser::to_bytes(&Value::Bool(true))?, vec![0x01]);
        assert_eq!(ser::to_bytes(&Value::U16(0x0102))?, vec![0x02, 0x01]);
        assert_eq!(
            ser::to_bytes(&Value::U64(1))?,
            vec![1, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            ser::to_bytes(&Value::Str(String::from("abc")))?,
            vec![0x03, 0x61, 0x62, 0x63]
        );
        assert_eq!(ser::to_bytes(&Value::Option(None))?, vec![0x00]);
        assert_eq!(
            ser::to_bytes(&Value::Option(Some(Box::new(Value::U8(9)))))?,
            vec![0x01, 0x09]
        );
        Ok(())
    }

    #[test]
    fn u256_split_layout() -> Result<()> {
        // 2^128 + 5 = low half 5, high half 1, low half first.
        let encoded = ser::to_bytes(&Value::U256(U256::new(5, 1)))?;
        let mut expected = vec![0u8; 32];
        expected[0] = 5;
        expected[16] = 1;
        assert_eq!(encoded, expected);

        let decoded = de::from_bytes(&encoded, |de| de.read_u256())?;
        assert_eq!(decoded, U256::new(5, 1));
        Ok(())
    }

    #[test]
    fn bool_byte_is_strict() {
        let err = de::from_bytes(&[0x02], |de| de.read_bool()).unwrap_err();
        assert_eq!(err, CodecError::InvalidBooleanByte { byte: 0x02 });
    }

    #[test]
    fn option_tag_is_strict() {
        let err = de::from_bytes(&[0x05, 0x09], |de| {
            de.read_option(|de| de.read_u8())
        })
        .unwrap_err();
        assert_eq!(err, CodecError::InvalidBooleanByte { byte: 0x05 });
    }

    #[test]
    fn non_minimal_len_prefix_rejected() {
        // "abc" with its length 3 encoded in two uleb128 groups.
        let buf = [0x83, 0x00, 0x61, 0x62, 0x63];
        let err = de::from_bytes(&buf, |de| de.read_str()).unwrap_err();
        assert_eq!(err, CodecError::NonMinimalVarint);
    }

    #[test]
    fn declared_len_must_fit_buffer() {
        // Length 200 with only 2 body bytes behind it.
        let err = de::from_bytes(&[0xc8, 0x01, 0x00, 0x00], |de| de.read_bytes()).unwrap_err();
        assert_eq!(
            err,
            CodecError::LengthExceedsBuffer {
                declared: 200,
                remaining: 2
            }
        );
    }

    #[test]
    fn unit_sequence_round_trips() -> Result<()> {
        // Five units encode to nothing beyond the count prefix, so the
        // element count legitimately exceeds the remaining byte count.
        let value = Value::Seq(vec![Value::Unit; 5]);
        let encoded = ser::to_bytes(&value)?;
        assert_eq!(encoded, vec![0x05]);
        let decoded = de::from_bytes(&encoded, |de| read_back(de, &value))?;
        assert_eq!(decoded, value);
        Ok(())
    }

    #[test]
    fn invalid_utf8_rejected() {
        let err = de::from_bytes(&[0x02, 0xff, 0xfe], |de| de.read_str()).unwrap_err();
        assert_eq!(err, CodecError::InvalidUtf8);
    }

    #[test]
    fn truncation_always_fails() -> Result<()> {
        for value in gen_scalars().iter().chain(gen_composites().iter()) {
            let encoded = ser::to_bytes(value)?;
            if encoded.is_empty() {
                continue;
            }
            let truncated = &encoded[..encoded.len() - 1];
            let res = de::from_bytes(truncated, |de| read_back(de, value));
            assert!(res.is_err(), "accepted truncation of {:?}", value);
        }
        Ok(())
    }

    #[test]
    fn trailing_bytes_rejected() {
        let err = de::from_bytes(&[0x01, 0x00], |de| de.read_bool()).unwrap_err();
        assert_eq!(err, CodecError::TrailingBytes { remaining: 1 });
    }

    #[test]
    fn map_insertion_order_is_immaterial() -> Result<()> {
        let mut rand_rng = rand::thread_rng();
        let entries = vec![
            (Value::Str(String::from("b")), Value::U64(2)),
            (Value::Str(String::from("a")), Value::U64(1)),
            (Value::Str(String::from("ab")), Value::U64(3)),
            (Value::Str(String::from("")), Value::U64(0)),
        ];

        let baseline = ser::to_bytes(&Value::Map(entries.clone()))?;
        for _ in 0..16 {
            let mut shuffled = entries.clone();
            shuffled.shuffle(&mut rand_rng);
            assert_eq!(ser::to_bytes(&Value::Map(shuffled))?, baseline);
        }
        Ok(())
    }

    #[test]
    fn duplicate_map_keys_rejected_on_encode() {
        let map = Value::Map(vec![
            (Value::U8(7), Value::U8(1)),
            (Value::U8(7), Value::U8(2)),
        ]);
        let err = ser::to_bytes(&map).unwrap_err();
        assert_eq!(err, CodecError::DuplicateMapKey { key: vec![7] });
    }

    #[test]
    fn out_of_order_map_rejected_on_decode() -> Result<()> {
        let map = Value::Map(vec![
            (Value::U8(1), Value::U8(10)),
            (Value::U8(2), Value::U8(20)),
        ]);
        let mut encoded = ser::to_bytes(&map)?;
        // Swap the two entries behind the count prefix: [len, k0, v0, k1, v1].
        encoded.swap(1, 3);
        encoded.swap(2, 4);

        let err = de::from_bytes(&encoded, |de| {
            de.read_map(|de| de.read_u8(), |de| de.read_u8())
        })
        .unwrap_err();
        assert_eq!(err, CodecError::MapNotCanonical);
        Ok(())
    }

    #[test]
    fn variant_index_bound_enforced() -> Result<()> {
        let encoded = ser::to_bytes(&Value::Variant {
            index: 3,
            payload: Box::new(Value::Unit),
        })?;

        let err = de::from_bytes(&encoded, |de| de.read_variant_index(3)).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnknownVariantIndex {
                index: 3,
                variant_count: 3
            }
        );

        let index = de::from_bytes(&encoded, |de| de.read_variant_index(4))?;
        assert_eq!(index, 3);
        Ok(())
    }

    #[test]
    fn oversized_len_rejected_on_encode() {
        let mut ser = Serializer::new();
        let err = ser.write_len(u32::MAX as usize + 1).unwrap_err();
        assert_eq!(
            err,
            CodecError::ValueOutOfRange {
                what: "sequence length",
                value: u32::MAX as u128 + 1
            }
        );
    }

    #[test]
    fn char_scalar_validated() {
        // 0xD800 is a surrogate, not a Unicode scalar value.
        let err = de::from_bytes(&[0x00, 0xd8, 0x00, 0x00], |de| de.read_char()).unwrap_err();
        assert_eq!(
            err,
            CodecError::ValueOutOfRange {
                what: "char scalar",
                value: 0xd800
            }
        );
    }
}
