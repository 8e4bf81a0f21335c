// src/utils/formatter.rs

const UNITS: [(u32, &str); 3] = [(30, "GiB"), (20, "MiB"), (10, "KiB")];

/// Human readable size with one truncated decimal, e.g. `1.5 MiB`.
/// The decimal is dropped when it is zero.
pub fn format_size(byte_size: u64) -> String {
    for (bits, unit) in UNITS {
        if byte_size >> bits != 0 {
            let den = 1u64 << bits;
            let whole = byte_size / den;
            // den / 10 truncates, so a remainder just under one unit gives 10
            let tenth = ((byte_size % den) / (den / 10)).min(9);
            return if tenth != 0 {
                format!("{}.{} {}", whole, tenth, unit)
            } else {
                format!("{} {}", whole, unit)
            };
        }
    }
    format!("{} B", byte_size)
}

/// `ls`-style permission string: directory flag then owner, group, other.
pub fn format_permissions(is_dir: bool, mode: u32) -> String {
    let mut perms = String::with_capacity(10);
    perms.push(if is_dir { 'd' } else { '-' });

    for shift in [6u32, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        perms.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        perms.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        perms.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }

    perms
}
