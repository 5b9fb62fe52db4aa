//! Builtin type mapping.
//!
//! A closed mapping from source-platform core types to target-language
//! built-ins, plus the lift table that says which generic arguments of
//! which types take primitives. The phase gate rejects any primitive
//! generic argument not covered by a lift rule, so nothing silently decays
//! to `any`.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// CLR full name → target builtin, for non-generic types.
static BUILTINS: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("System.Void", "void"),
        ("System.Boolean", "boolean"),
        ("System.Char", "string"),
        ("System.String", "string"),
        ("System.SByte", "number"),
        ("System.Byte", "number"),
        ("System.Int16", "number"),
        ("System.UInt16", "number"),
        ("System.Int32", "number"),
        ("System.UInt32", "number"),
        ("System.Int64", "bigint"),
        ("System.UInt64", "bigint"),
        ("System.IntPtr", "number"),
        ("System.UIntPtr", "number"),
        ("System.Single", "number"),
        ("System.Double", "number"),
        ("System.Decimal", "number"),
        ("System.Object", "any"),
        ("System.DateTime", "Date"),
        ("System.DateTimeOffset", "Date"),
        ("System.TimeSpan", "number"),
        ("System.Guid", "string"),
        ("System.Uri", "string"),
        ("System.Exception", "Error"),
        ("System.Array", "unknown[]"),
        ("System.Delegate", "Function"),
        ("System.MulticastDelegate", "Function"),
        ("System.Threading.Tasks.Task", "Promise<void>"),
        ("System.Threading.Tasks.ValueTask", "Promise<void>"),
    ]
    .into_iter()
    .collect()
});

/// CLR full name → template for generic built-ins. `{0}`, `{1}` take the
/// rendered type arguments.
static GENERIC_BUILTINS: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("System.Nullable`1", "{0} | null"),
        ("System.Threading.Tasks.Task`1", "Promise<{0}>"),
        ("System.Threading.Tasks.ValueTask`1", "Promise<{0}>"),
        ("System.Collections.Generic.IEnumerable`1", "Iterable<{0}>"),
        ("System.Collections.Generic.IAsyncEnumerable`1", "AsyncIterable<{0}>"),
        ("System.Collections.Generic.IEnumerator`1", "Iterator<{0}>"),
        ("System.Collections.Generic.List`1", "{0}[]"),
        ("System.Collections.Generic.IList`1", "{0}[]"),
        ("System.Collections.Generic.IReadOnlyList`1", "readonly {0}[]"),
        ("System.Collections.Generic.ICollection`1", "{0}[]"),
        ("System.Collections.Generic.IReadOnlyCollection`1", "readonly {0}[]"),
        ("System.Collections.Generic.Dictionary`2", "Map<{0}, {1}>"),
        ("System.Collections.Generic.IDictionary`2", "Map<{0}, {1}>"),
        ("System.Collections.Generic.IReadOnlyDictionary`2", "ReadonlyMap<{0}, {1}>"),
        ("System.Collections.Generic.HashSet`1", "Set<{0}>"),
        ("System.Collections.Generic.ISet`1", "Set<{0}>"),
        ("System.Collections.Generic.KeyValuePair`2", "[{0}, {1}]"),
        ("System.Action`1", "(arg: {0}) => void"),
        ("System.Func`1", "() => {0}"),
        ("System.Func`2", "(arg: {0}) => {1}"),
    ]
    .into_iter()
    .collect()
});

/// Which generic argument positions of which types lift primitives.
static PRIMITIVE_LIFT: Lazy<FxHashMap<&'static str, &'static [u16]>> = Lazy::new(|| {
    const ALL1: &[u16] = &[0];
    const ALL2: &[u16] = &[0, 1];
    [
        ("System.Nullable`1", ALL1),
        ("System.Threading.Tasks.Task`1", ALL1),
        ("System.Threading.Tasks.ValueTask`1", ALL1),
        ("System.Collections.Generic.IEnumerable`1", ALL1),
        ("System.Collections.Generic.IAsyncEnumerable`1", ALL1),
        ("System.Collections.Generic.IEnumerator`1", ALL1),
        ("System.Collections.Generic.List`1", ALL1),
        ("System.Collections.Generic.IList`1", ALL1),
        ("System.Collections.Generic.IReadOnlyList`1", ALL1),
        ("System.Collections.Generic.ICollection`1", ALL1),
        ("System.Collections.Generic.IReadOnlyCollection`1", ALL1),
        ("System.Collections.Generic.Dictionary`2", ALL2),
        ("System.Collections.Generic.IDictionary`2", ALL2),
        ("System.Collections.Generic.IReadOnlyDictionary`2", ALL2),
        ("System.Collections.Generic.HashSet`1", ALL1),
        ("System.Collections.Generic.ISet`1", ALL1),
        ("System.Collections.Generic.KeyValuePair`2", ALL2),
        ("System.Action`1", ALL1),
        ("System.Func`1", ALL1),
        ("System.Func`2", ALL2),
    ]
    .into_iter()
    .collect()
});

/// Primitive CLR names for the purposes of the lift rule.
static PRIMITIVES: Lazy<FxHashMap<&'static str, ()>> = Lazy::new(|| {
    [
        "System.Boolean", "System.Char", "System.String", "System.SByte", "System.Byte",
        "System.Int16", "System.UInt16", "System.Int32", "System.UInt32", "System.Int64",
        "System.UInt64", "System.Single", "System.Double", "System.Decimal",
    ]
    .into_iter()
    .map(|n| (n, ()))
    .collect()
});

/// The closed builtin mapping.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeMap;

impl TypeMap {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Map a non-generic core type to its target builtin.
    #[must_use]
    pub fn try_map_builtin(&self, full_name: &str) -> Option<&'static str> {
        BUILTINS.get(full_name).copied()
    }

    /// Instantiate a generic builtin with rendered arguments.
    #[must_use]
    pub fn try_map_generic(&self, full_name: &str, rendered_args: &[String]) -> Option<String> {
        let template = GENERIC_BUILTINS.get(full_name)?;
        let mut out = (*template).to_string();
        for (i, arg) in rendered_args.iter().enumerate() {
            out = out.replace(&format!("{{{i}}}"), arg);
        }
        Some(out)
    }

    /// Whether `full_name` is covered by either builtin table.
    #[must_use]
    pub fn is_builtin(&self, full_name: &str) -> bool {
        BUILTINS.contains_key(full_name) || GENERIC_BUILTINS.contains_key(full_name)
    }

    /// Whether `full_name` is a primitive for the lift rule.
    #[must_use]
    pub fn is_primitive(&self, full_name: &str) -> bool {
        PRIMITIVES.contains_key(full_name)
    }
}

/// The lift table: which generic argument positions accept primitives.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrimitiveLift;

impl PrimitiveLift {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Positions of `full_name` that lift primitives, if any rule exists.
    #[must_use]
    pub fn lift_positions(&self, full_name: &str) -> Option<&'static [u16]> {
        PRIMITIVE_LIFT.get(full_name).copied()
    }

    /// Whether a primitive is permitted at `position` of `full_name`.
    #[must_use]
    pub fn covers(&self, full_name: &str, position: u16) -> bool {
        self.lift_positions(full_name)
            .is_some_and(|positions| positions.contains(&position))
    }
}
