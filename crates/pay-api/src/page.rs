//! # Checkout Page
//!
//! The single HTML page served at `/`. Clicking the button asks `/checkout`
//! for a session and hands its id to Stripe.js.

const PUBLISHABLE_KEY_SLOT: &str = "{{PUBLISHABLE_KEY}}";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
    <head>
        <meta charset="utf-8">
        <title>Checkout</title>
        <script src="https://js.stripe.com/v3/"></script>
    </head>
    <body>
        <h1>Comprar</h1>
        <button id="checkoutButton">Comprar</button>

        <script>
            const checkoutButton = document.getElementById('checkoutButton')
            checkoutButton.addEventListener('click', async () => {
                const response = await fetch('/checkout', {
                    method: 'POST',
                    headers: {
                        'Content-Type': 'application/json',
                    },
                })
                const body = await response.json()
                if (!response.ok) {
                    alert(body.error)
                    return
                }
                const stripe = Stripe({{PUBLISHABLE_KEY}})
                await stripe.redirectToCheckout({ sessionId: body.id })
            })
        </script>
    </body>
</html>
"#;

/// Render the checkout page for a publishable key
pub fn render_checkout_page(publishable_key: &str) -> String {
    // A JSON string is a valid JS string literal; `<` is escaped so the key
    // cannot close the script element.
    let literal = serde_json::Value::from(publishable_key)
        .to_string()
        .replace('<', "\\u003c");
    TEMPLATE.replace(PUBLISHABLE_KEY_SLOT, &literal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_embedded() {
        let html = render_checkout_page("pk_test_xyz789");

        assert!(html.contains(r#"Stripe("pk_test_xyz789")"#));
        assert!(html.contains("https://js.stripe.com/v3/"));
        assert!(html.contains("fetch('/checkout'"));
        assert!(!html.contains(PUBLISHABLE_KEY_SLOT));
    }

    #[test]
    fn test_key_cannot_escape_script() {
        let html = render_checkout_page(r#"pk_test_"</script><script>alert(1)"#);

        assert!(!html.contains("</script><script>alert(1)"));
        assert!(html.contains(r#"pk_test_\"\u003c/script>"#));
    }
}
