//! Zig literal rendering for single values.

use std::fmt::{self, Display, Formatter};

use armoury_data::schema::{PartFlags, Scaling};

/// A float with at most four decimals and no trailing zeros: `0.5`, `12`.
pub fn float(value: f64) -> String {
    let fixed = format!("{value:.4}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn boolean(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// `null` or the float literal.
pub fn optional_float(value: Option<f64>) -> String {
    value.map_or_else(|| "null".to_string(), float)
}

/// A quoted, escaped Zig string literal.
pub struct Str<'a>(pub &'a str);

impl Display for Str<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.0.chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '"' => f.write_str("\\\"")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                c => write!(f, "{c}")?,
            }
        }
        f.write_str("\"")
    }
}

/// Zig keywords and primitive names, none of which may appear bare as an
/// identifier.
const RESERVED: &[&str] = &[
    "addrspace", "align", "allowzero", "and", "anyframe", "anytype", "asm", "async", "await",
    "break", "callconv", "catch", "comptime", "const", "continue", "defer", "else", "enum",
    "errdefer", "error", "export", "extern", "fn", "for", "if", "inline", "linksection",
    "noalias", "noinline", "nosuspend", "opaque", "or", "orelse", "packed", "pub", "resume",
    "return", "struct", "suspend", "switch", "test", "threadlocal", "try", "union",
    "unreachable", "usingnamespace", "var", "volatile", "while",
    // Primitive types and values.
    "anyerror", "anyopaque", "bool", "comptime_float", "comptime_int", "f16", "f32", "f64",
    "f80", "f128", "false", "isize", "noreturn", "null", "true", "type", "undefined", "usize",
    "void", "c_char", "c_short", "c_ushort", "c_int", "c_uint", "c_long", "c_ulong",
    "c_longlong", "c_ulonglong", "c_longdouble",
];

/// `i7`, `u32` and the like.
fn is_integer_type(name: &str) -> bool {
    name.strip_prefix(['i', 'u'])
        .is_some_and(|bits| !bits.is_empty() && bits.bytes().all(|b| b.is_ascii_digit()))
}

/// An identifier; names that are not plain identifiers, or that are
/// reserved, use `@"..."`.
pub struct Ident<'a>(pub &'a str);

impl Ident<'_> {
    fn is_plain(&self) -> bool {
        let mut chars = self.0.chars();
        let well_formed = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        well_formed && self.0 != "_" && !RESERVED.contains(&self.0) && !is_integer_type(self.0)
    }
}

impl Display for Ident<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_plain() {
            f.write_str(self.0)
        } else {
            write!(f, "@{}", Str(self.0))
        }
    }
}

/// `&.{}` or `&.{ "a", "b" }`.
pub fn string_list(values: &[String]) -> String {
    slice(values.iter().map(|v| Str(v).to_string()))
}

/// `&.{}` or `&.{ a, b }` from already-rendered items.
pub fn slice(items: impl Iterator<Item = String>) -> String {
    let items: Vec<String> = items.collect();
    if items.is_empty() {
        "&.{}".to_string()
    } else {
        format!("&.{{ {} }}", items.join(", "))
    }
}

pub fn height(value: Option<&str>) -> String {
    match value {
        Some(h) if !h.is_empty() => format!("body.Height.{h}"),
        _ => "null".to_string(),
    }
}

pub fn part_tag(tag: &str) -> String {
    format!("body.PartTag.{tag}")
}

pub fn side(side: &str) -> &'static str {
    match side {
        "left" => "body.Side.left",
        "right" => "body.Side.right",
        "none" => "body.Side.none",
        _ => "body.Side.center",
    }
}

pub fn totality(totality: &str) -> String {
    match totality {
        "total" | "intimidating" | "comprehensive" | "frontal" | "minimal" => {
            format!("armour.Totality.{totality}")
        }
        _ => "armour.Totality.frontal".to_string(),
    }
}

/// Coverage layer to equipment slot.
pub fn armour_layer(layer: &str) -> &'static str {
    match layer {
        "padding" => "inventory.Layer.Gambeson",
        "cloak" => "inventory.Layer.Cloak",
        _ => "inventory.Layer.Plate",
    }
}

/// Only set flags are listed; `.{}` when none are.
pub fn part_flags(flags: &PartFlags) -> String {
    let set: Vec<String> = [
        (flags.vital, "is_vital"),
        (flags.internal, "is_internal"),
        (flags.grasp, "can_grasp"),
        (flags.stand, "can_stand"),
        (flags.see, "can_see"),
        (flags.hear, "can_hear"),
    ]
    .into_iter()
    .filter_map(|(on, field)| on.then(|| format!(".{field} = true")))
    .collect();

    if set.is_empty() {
        ".{}".to_string()
    } else {
        format!(".{{ {} }}", set.join(", "))
    }
}

pub fn damage_types(types: &[String]) -> String {
    slice(types.iter().map(|t| format!("damage.Kind.{t}")))
}

/// A single stat, the average of exactly two, or `power` otherwise.
pub fn scaling(scaling: &Scaling) -> String {
    let ratio = float(scaling.ratio);
    let stats = &scaling.stats;
    match (stats.stat.as_deref(), stats.average.as_slice()) {
        (Some(stat), _) => {
            format!(".{{ .ratio = {ratio}, .stats = .{{ .stat = stats.Accessor.{stat} }} }}")
        }
        (None, [a, b]) => format!(
            ".{{ .ratio = {ratio}, .stats = .{{ .average = .{{ stats.Accessor.{a}, stats.Accessor.{b} }} }} }}"
        ),
        _ => format!(".{{ .ratio = {ratio}, .stats = .{{ .stat = stats.Accessor.power }} }}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armoury_data::schema::ScalingStats;

    #[test]
    fn float_trims_trailing_zeros() {
        assert_eq!(float(0.5), "0.5");
        assert_eq!(float(12.0), "12");
        assert_eq!(float(0.0), "0");
        assert_eq!(float(0.333333), "0.3333");
        assert_eq!(float(100.0), "100");
        assert_eq!(float(-1.25), "-1.25");
    }

    #[test]
    fn strings_are_escaped() {
        assert_eq!(Str("plain").to_string(), "\"plain\"");
        assert_eq!(Str("a \"b\"\\c\nd").to_string(), r#""a \"b\"\\c\nd""#);
    }

    #[test]
    fn identifiers_fall_back_to_quoted_form() {
        assert_eq!(Ident("thrust").to_string(), "thrust");
        assert_eq!(Ident("_x2").to_string(), "_x2");
        assert_eq!(Ident("shield-bash").to_string(), "@\"shield-bash\"");
        assert_eq!(Ident("2hand").to_string(), "@\"2hand\"");
    }

    #[test]
    fn reserved_names_are_quoted() {
        for name in ["error", "test", "const", "and", "type", "null", "u8", "i64", "_"] {
            assert_eq!(Ident(name).to_string(), format!("@\"{name}\""), "{name}");
        }
        assert_eq!(Ident("errors").to_string(), "errors");
        assert_eq!(Ident("up").to_string(), "up");
        assert_eq!(Ident("u8x").to_string(), "u8x");
    }

    #[test]
    fn lists() {
        assert_eq!(string_list(&[]), "&.{}");
        assert_eq!(
            string_list(&["stout".to_string(), "bearded".to_string()]),
            r#"&.{ "stout", "bearded" }"#
        );
        assert_eq!(
            damage_types(&["slash".to_string(), "pierce".to_string()]),
            "&.{ damage.Kind.slash, damage.Kind.pierce }"
        );
    }

    #[test]
    fn enum_mappings_have_defaults() {
        assert_eq!(side("left"), "body.Side.left");
        assert_eq!(side("dorsal"), "body.Side.center");
        assert_eq!(totality("minimal"), "armour.Totality.minimal");
        assert_eq!(totality("partial"), "armour.Totality.frontal");
        assert_eq!(armour_layer("padding"), "inventory.Layer.Gambeson");
        assert_eq!(armour_layer("cloak"), "inventory.Layer.Cloak");
        assert_eq!(armour_layer("outer"), "inventory.Layer.Plate");
        assert_eq!(armour_layer("mail"), "inventory.Layer.Plate");
        assert_eq!(height(None), "null");
        assert_eq!(height(Some("high")), "body.Height.high");
    }

    #[test]
    fn flags_list_only_set_fields() {
        assert_eq!(part_flags(&PartFlags::default()), ".{}");
        let flags = PartFlags {
            vital: true,
            see: true,
            ..PartFlags::default()
        };
        assert_eq!(part_flags(&flags), ".{ .is_vital = true, .can_see = true }");
    }

    #[test]
    fn scaling_forms() {
        let single = Scaling {
            ratio: 0.5,
            stats: ScalingStats {
                stat: Some("speed".to_string()),
                average: Vec::new(),
            },
        };
        assert_eq!(
            scaling(&single),
            ".{ .ratio = 0.5, .stats = .{ .stat = stats.Accessor.speed } }"
        );

        let average = Scaling {
            ratio: 1.0,
            stats: ScalingStats {
                stat: None,
                average: vec!["power".to_string(), "speed".to_string()],
            },
        };
        assert_eq!(
            scaling(&average),
            ".{ .ratio = 1, .stats = .{ .average = .{ stats.Accessor.power, stats.Accessor.speed } } }"
        );

        assert_eq!(
            scaling(&Scaling::default()),
            ".{ .ratio = 1, .stats = .{ .stat = stats.Accessor.power } }"
        );
    }
}
