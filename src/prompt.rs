use std::fmt::Write as _;

use crate::adapter::ToolSet;

pub const GUIDELINES_PROMPT: &str = "paper_guidelines";

const PREAMBLE: &str = "\
## Working with Paper

Paper is a design app running on the user's machine. You can read and edit the
open Paper file through the tools below. Every tool talks to the running app;
if a tool reports that Paper is not running, ask the user to open it rather
than retrying in a loop.
";

const RULES: &str = "\
### Rules

- Orient first: call paper_get_basic_info, then inspect the nodes you plan to change.
- Refer to nodes only by ids returned from Paper tools. Never guess ids.
- Wrap a series of edits in paper_start_working / paper_finish_working on the affected nodes.
- Build with paper_write_html one section at a time and check each step with paper_screenshot.
- Check fonts with paper_get_fonts before using a family for the first time.
";

/// System-prompt section describing the Paper tools to a model.
pub fn guidelines(tools: &ToolSet) -> String {
    let mut out = String::from(PREAMBLE);
    out.push_str("\n### Tools\n\n");
    for tool in tools.iter() {
        let _ = writeln!(out, "- `{}` ({}): {}", tool.name(), tool.label(), tool.description());
    }
    out.push('\n');
    out.push_str(RULES);
    out
}
