// Built-in documentation shown when no markdown files are given

use super::{parse_page, Page};

const QUICKSTART: &str = r#"# Quickstart

Get from zero to a first request in a couple of minutes. Every snippet on
these pages has a copy control: hover it with the mouse, or Tab to it and
press Enter.

## Install

```bash
curl -fsSL https://get.example.dev/install.sh | bash
export EXAMPLE_API_KEY="sk-live-..."
```

On Windows use PowerShell instead:

```powershell
Invoke-WebRequest -Uri https://get.example.dev/install.ps1 -OutFile install.ps1
.\install.ps1 -Channel stable
$env:EXAMPLE_API_KEY = "sk-live-..."
```

## First request

```bash
curl -s https://api.example.dev/v1/echo \
  -H "Authorization: Bearer $EXAMPLE_API_KEY" \
  -d '{"message": "hello"}'
```

## Next steps

- Read the [API reference](/api#requests)
- Compare [plans](/pricing#pricing)
"#;

const API: &str = r#"# API reference

All endpoints accept and return JSON.

## Requests

```json
{
  "model": "echo-1",
  "messages": [{"role": "user", "content": "hello"}],
  "max_tokens": 256,
  "stream": false
}
```

## Responses

```json
{
  "id": "msg_01",
  "content": "hello",
  "usage": {"input_tokens": 5, "output_tokens": 1},
  "error": null
}
```

## Errors

Failed requests return a non-2xx status and an error body:

```json
{"error": {"type": "rate_limit", "retry_after": 1.5}}
```
"#;

const PROVIDERS: &str = r#"# Provider setup

## Shell profile

```sh
if [ -f "$HOME/.example/env" ]; then
  source "$HOME/.example/env"
fi
```

## Windows service

```ps1
Get-Service -Name ExampleAgent | Restart-Service -Force
Write-Host "agent restarted"
```

## Config file

```toml
[agent]
endpoint = "https://api.example.dev"
retries = 3
```
"#;

const PRICING: &str = r#"# Plans

Jump here from anywhere with the `/pricing#pricing` route.

## Overview

Usage is billed per million tokens. Free credits reset monthly.

## Pricing

- Free: 1M tokens per month
- Team: 0.50 per 1M tokens
- Enterprise: contact sales

## Limits {#limits}

```bash
example usage --month current --format table
```
"#;

/// The built-in page set, in sidebar order
pub fn demo_pages() -> Vec<Page> {
    vec![
        parse_page("/", "Quickstart", QUICKSTART),
        parse_page("/api", "API", API),
        parse_page("/providers", "Providers", PROVIDERS),
        parse_page("/pricing", "Pricing", PRICING),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::Block;

    #[test]
    fn demo_routes_are_unique_and_rooted() {
        let pages = demo_pages();
        let mut paths: Vec<_> = pages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths[0], "/");
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), pages.len());
    }

    #[test]
    fn pricing_anchor_exists() {
        let pages = demo_pages();
        let pricing = pages.iter().find(|p| p.path == "/pricing").unwrap();
        assert!(pricing.headings().any(|(_, _, anchor)| anchor == "pricing"));
        assert!(pricing.headings().any(|(_, _, anchor)| anchor == "limits"));
    }

    #[test]
    fn every_page_has_code() {
        for page in demo_pages() {
            assert!(
                page.blocks.iter().any(|b| matches!(b, Block::Code { .. })),
                "{} has no snippets",
                page.path
            );
        }
    }
}
