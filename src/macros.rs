// src/macros.rs

/// `s!()` is an empty `String`, `s!(x)` is `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($part:expr) => {
        ::std::string::String::from($part)
    };
}

/// Concatenate string-like parts (`&str`, `String`, `&String`) into one `String`.
#[macro_export]
macro_rules! join {
    ($head:expr $(, $part:expr)+ $(,)?) => {{
        let mut out = $crate::s!(::std::convert::AsRef::<str>::as_ref(&$head));
        $( out.push_str(::std::convert::AsRef::<str>::as_ref(&$part)); )+
        out
    }};
}

/// `Vec<String>` row from any `Display` cells.
#[macro_export]
macro_rules! row {
    ($($cell:expr),* $(,)?) => {
        vec![$(::std::string::ToString::to_string(&$cell)),*]
    };
}
