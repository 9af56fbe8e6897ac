//! Polar format documentation resource (static Markdown).

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

pub struct PolarFormatResource;

impl ResourceDefinition for PolarFormatResource {
    const URI: &'static str = "xfoil://docs/polar-format";
    const NAME: &'static str = "Polar CSV Format";
    const DESCRIPTION: &'static str =
        "How compute_polar requests are run and how the returned CSV is shaped";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        ResourceContent::Text(DOCUMENTATION.to_string())
    }
}

const DOCUMENTATION: &str = r#"# Polar CSV Format

`compute_polar` (and `POST /polar` on the HTTP transport) runs one XFOIL
viscous sweep and returns the accumulated polar as CSV.

## Request

| Field              | Type       | Notes                                          |
|--------------------|------------|------------------------------------------------|
| `airfoil_name`     | string     | Letters, digits, `_`, `-`, `.`; names `<name>.dat` |
| `airfoil_geometry` | string     | Coordinate file contents, written verbatim     |
| `angles_of_attack` | number[]   | Degrees, at least one, run in the given order  |
| `reynolds_number`  | number     | Positive                                       |
| `mach_number`      | number     | Optional, default `0`                          |
| `max_iterations`   | integer    | Optional, default `200`                        |

## Response

```text
alpha,CL,CD,CM
0.0,0.3,0.01,-0.05
2.0,0.52,0.011,-0.052
```

- The solver's polar file is converted line by line: runs of spaces or
  commas become a single comma and blank lines are dropped. Nothing else is
  removed, so XFOIL's banner, its parameter lines and the `------` separator
  row are passed through.
- If the first cell of the first row does not contain `alpha`, the header
  `alpha,CL,CD,CM` is inserted above it. Otherwise the solver's own header
  row is kept as-is.
- Results are the fully numeric rows, one per converged angle. Angles that
  fail to converge are simply absent.
- No trailing newline.

## Non-zero exit codes

XFOIL often exits non-zero after a run that produced a valid polar. In that
case the data is still returned, prefixed with a comment line:

```text
# xfoil exit code 2
alpha,CL,CD,CM
0.0,0.3,0.01,-0.05
```

Only a missing polar file is reported as an error.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_format_metadata() {
        assert_eq!(PolarFormatResource::URI, "xfoil://docs/polar-format");
        assert_eq!(PolarFormatResource::MIME_TYPE, "text/markdown");
    }

    #[test]
    fn test_documents_exit_code_comment() {
        assert!(DOCUMENTATION.contains("# xfoil exit code 2"));
        assert!(DOCUMENTATION.contains(&crate::domains::polar::CANONICAL_HEADER.join(",")));
        assert!(DOCUMENTATION.contains("banner"));
    }
}
