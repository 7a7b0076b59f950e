use crate::tag::{AccountAddress, StructTag, TypeTag};
use bcs_codec::{CodecError, Result};

/// Parse a textual type signature into a [`TypeTag`] tree.
///
/// Accepted forms: primitive keywords (`bool`, `u8`..`u256`, `address`,
/// `signer`, `string`), `vector<T>` with arbitrary nesting, and qualified
/// `addr::module::Name<T1,..>` names whose address may be a short `0x1`
/// style literal or the full-width canonical hex form.
pub fn parse_type_tag(s: &str) -> Result<TypeTag> {
    let s = s.trim();
    match s {
        "bool" => Ok(TypeTag::Bool),
        "u8" => Ok(TypeTag::U8),
        "u16" => Ok(TypeTag::U16),
        "u32" => Ok(TypeTag::U32),
        "u64" => Ok(TypeTag::U64),
        "u128" => Ok(TypeTag::U128),
        "u256" => Ok(TypeTag::U256),
        "address" => Ok(TypeTag::Address),
        "signer" => Ok(TypeTag::Signer),
        "string" => Ok(TypeTag::Str),
        _ => {
            if let Some(open) = s.strip_prefix("vector<") {
                let inner = open.strip_suffix('>').ok_or_else(|| {
                    malformed(s, "vector is missing its closing '>'")
                })?;
                let inner = parse_type_tag(inner)?;
                Ok(TypeTag::Vector(Box::new(inner)))
            } else if s.contains("::") {
                parse_struct_tag(s).map(|stag| TypeTag::Struct(Box::new(stag)))
            } else {
                Err(malformed(s, "unknown primitive keyword"))
            }
        }
    }
}

/// Parse the qualified `addr::module::Name<params>` form.
pub fn parse_struct_tag(s: &str) -> Result<StructTag> {
    let s = s.trim();
    let parts: Vec<&str> = s.splitn(3, "::").collect();
    if parts.len() != 3 {
        return Err(malformed(s, "expected address::module::Name"));
    }

    let address = AccountAddress::from_hex(parts[0])?;
    let module = parse_identifier(s, parts[1])?;

    let name_and_params = parts[2];
    let name_end = name_and_params
        .find('<')
        .unwrap_or(name_and_params.len());
    let name = parse_identifier(s, &name_and_params[..name_end])?;

    let type_params = if name_end < name_and_params.len() {
        if !name_and_params.ends_with('>') {
            return Err(malformed(s, "unbalanced '<' in type parameters"));
        }
        let params = &name_and_params[name_end + 1..name_and_params.len() - 1];
        parse_type_params(s, params)?
    } else {
        vec![]
    };

    Ok(StructTag {
        address,
        module,
        name,
        type_params,
    })
}

/// Split `params` on depth-0 commas and parse each piece.
fn parse_type_params(whole: &str, params: &str) -> Result<Vec<TypeTag>> {
    if params.trim().is_empty() {
        return Err(malformed(whole, "empty type parameter list"));
    }

    let mut tags = vec![];
    let mut depth: i32 = 0;
    let mut start = 0;
    for (i, c) in params.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth < 0 {
                    return Err(malformed(whole, "unbalanced '>' in type parameters"));
                }
            }
            ',' if depth == 0 => {
                tags.push(parse_type_tag(&params[start..i])?);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(malformed(whole, "unbalanced '<' in type parameters"));
    }
    if params[start..].trim().is_empty() {
        return Err(malformed(whole, "empty type parameter"));
    }
    tags.push(parse_type_tag(&params[start..])?);

    Ok(tags)
}

fn parse_identifier(whole: &str, ident: &str) -> Result<String> {
    let mut chars = ident.chars();
    let head_ok = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    let tail_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !head_ok || !tail_ok {
        return Err(malformed(whole, "invalid identifier segment"));
    }
    Ok(String::from(ident))
}

fn malformed(s: &str, reason: &str) -> CodecError {
    CodecError::MalformedTypeTag {
        reason: format!("{} in {:?}", reason, s),
    }
}
