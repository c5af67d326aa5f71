//! API reference rendering.
//!
//! A reference page is a sidebar index of every entry grouped by section,
//! followed by one block per entry:
//!
//! ```text
//! <span id="spry.image_load">       anchor (lowercased name)
//! Image                              section label
//! spry.image_load(path)              signature, `.field` args omitted
//! description                        Markdown, dedented
//! Name | Type | Default | Description   only when there are args
//! Returns ...                        nothing / single / labeled alternatives
//! example                            Lua code block, when present
//! ```
//!
//! The arguments table only grows the columns it needs: `Default` appears
//! when some argument has a default, `Description` when some argument has
//! text.

use crate::render::{code_block, markdown};
use crate::text::{anchor_id, dedent, signature};
use crate::types::{ApiArg, ApiEntry, ApiSection, Returns};
use maud::{Markup, html};

/// Render every section of a reference page.
pub fn render_reference(sections: &[ApiSection]) -> Markup {
    html! {
        div.reference {
            aside.function-index {
                ul #function-list {
                    @for section in sections {
                        li {
                            span.section-title { (section.title) }
                            ul {
                                @for entry in &section.entries {
                                    @let anchor = anchor_id(&entry.name);
                                    li data-key=(anchor) {
                                        a href={ "#" (anchor) } { code { (entry.name) } }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            main.entries {
                @for section in sections {
                    @for entry in &section.entries {
                        (render_entry(&section.title, entry))
                    }
                }
            }
        }
    }
}

/// One entry block.
pub fn render_entry(section: &str, entry: &ApiEntry) -> Markup {
    let sig = signature(&entry.name, entry.args.iter().map(|a| a.name.as_str()));
    let anchor = anchor_id(&entry.name);
    html! {
        div.entry {
            span.anchor id=(anchor) {}
            div.section-label { (section) }
            h2 {
                a href={ "#" (anchor) } { code { (sig) } }
            }
            @if !entry.desc.trim().is_empty() {
                (markdown(&dedent(&entry.desc)))
            }
            (render_args(&entry.args))
            (render_returns(&entry.returns))
            @if !entry.example.trim().is_empty() {
                div.example {
                    span.example-label { "Example" }
                    (code_block(&entry.example))
                }
            }
        }
    }
}

/// Arguments table, or nothing for a function without arguments.
pub fn render_args(args: &[ApiArg]) -> Markup {
    if args.is_empty() {
        return html! {};
    }
    let has_default = args.iter().any(|a| a.default.is_some());
    let has_desc = args.iter().any(|a| !a.desc.trim().is_empty());

    html! {
        h4 { "Arguments" }
        table.args {
            thead {
                tr {
                    th { "Name" }
                    th { "Type" }
                    @if has_default {
                        th { "Default" }
                    }
                    @if has_desc {
                        th { "Description" }
                    }
                }
            }
            tbody {
                @for arg in args {
                    tr {
                        td { code { (arg.name) } }
                        td {
                            @match arg.ty.as_deref().filter(|ty| !ty.trim().is_empty()) {
                                Some(ty) => { code { (ty) } },
                                None => { span.missing { "N/A" } },
                            }
                        }
                        @if has_default {
                            td {
                                @if let Some(default) = &arg.default {
                                    code { (default) }
                                }
                            }
                        }
                        @if has_desc {
                            td { (arg.desc.trim()) }
                        }
                    }
                }
            }
        }
    }
}

/// The "Returns" line(s) for an entry.
pub fn render_returns(returns: &Returns) -> Markup {
    html! {
        @match returns {
            Returns::Nothing => {
                p.returns.missing { "Returns nothing." }
            },
            Returns::Single(ty) => {
                p.returns {
                    span.returns-label { "Returns" }
                    " "
                    code { (ty) }
                    "."
                }
            },
            Returns::Labeled(alts) => {
                @for alt in alts {
                    p.returns {
                        span.returns-label { "Returns" }
                        " "
                        code { (alt.ty) }
                        " "
                        span.return-condition { (alt.label) }
                        "."
                    }
                }
            },
        }
    }
}
