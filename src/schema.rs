// Tables produced by exporting an MDX/MDD pair to SQLite.
// The entry database holds `mdx` and `meta`; the attachment database holds `mdd`.

diesel::table! {
    mdx (entry) {
        entry -> Text,
        paraphrase -> Text,
    }
}

diesel::table! {
    meta (key) {
        key -> Text,
        value -> Text,
    }
}

diesel::table! {
    mdd (entry) {
        entry -> Text,
        file -> Binary,
    }
}
