//! Shop command - interactive session
//!
//! Walks the same screens as the app: sign in, browse with infinite
//! scroll, product details, cart, checkout, store locator and profile.
//! The session and cart live until the command exits.

use anyhow::Result;
use clipkart_core::domain::order::{MAX_QUANTITY, MIN_QUANTITY};
use clipkart_core::services::CatalogState;
use clipkart_core::{ClipkartContext, EntryPoint, PaymentMethod, Product, RegistrationForm};
use colored::Colorize;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use super::products::fetch_spinner;
use super::{
    block_on, error_kind, get_context, password_or_prompt, text_or_prompt, EventLog,
};
use crate::output;

pub fn run() -> Result<()> {
    if atty::isnt(atty::Stream::Stdin) {
        anyhow::bail!("'ck shop' needs an interactive terminal");
    }

    let log = EventLog::open(EntryPoint::Shop);
    log.command("shop");

    let mut shop = Shop {
        ctx: get_context()?,
        log,
    };
    shop.run()
}

struct Shop {
    ctx: ClipkartContext,
    log: EventLog,
}

impl Shop {
    fn screen(&self, name: &str) {
        self.log.screen(name);
    }

    fn run(&mut self) -> Result<()> {
        output::info("Welcome to Clipkart!");
        loop {
            let keep_going = if self.ctx.session.is_logged_in() {
                self.home()?
            } else {
                self.welcome()?
            };
            if !keep_going {
                break;
            }
        }
        output::info("See you soon!");
        Ok(())
    }

    fn welcome(&mut self) -> Result<bool> {
        self.screen("login");
        let choice = Select::new()
            .with_prompt("Clipkart")
            .items(&["Log in", "Create account", "Forgot password", "Quit"])
            .default(0)
            .interact()?;

        match choice {
            0 => self.login()?,
            1 => self.register()?,
            2 => self.reset_password()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn login(&mut self) -> Result<()> {
        let email = text_or_prompt(None, "Email")?;
        let password = password_or_prompt(None, "Password")?;

        match self.ctx.auth_service.login(&email, &password) {
            Ok(user) => {
                self.log.event("login_succeeded");
                output::success(&format!("Hi {}!", user.display_name()));
            }
            Err(e) => {
                self.log.error("login_failed", error_kind(&e), None);
                output::error(&e.to_string());
            }
        }
        Ok(())
    }

    fn register(&mut self) -> Result<()> {
        self.screen("create_account");
        let full_name = text_or_prompt(None, "Full name")?;
        let email = text_or_prompt(None, "Email")?;
        let password = password_or_prompt(None, "Password")?;
        let confirm_password = password_or_prompt(None, "Confirm password")?;

        let form = RegistrationForm::new(email, password, full_name, confirm_password);
        match self.ctx.auth_service.register(&form) {
            Ok(_) => {
                self.log.event("account_created");
                output::success("Account created. Please log in.");
            }
            Err(e) => {
                self.log.error("registration_failed", error_kind(&e), None);
                output::error(&e.to_string());
            }
        }
        Ok(())
    }

    fn reset_password(&mut self) -> Result<()> {
        self.screen("forgot_password");
        let email = text_or_prompt(None, "Email")?;
        let new_password = password_or_prompt(None, "New password")?;

        match self.ctx.auth_service.reset_password(&email, &new_password) {
            Ok(()) => {
                self.log.event("password_reset");
                output::success("Password updated. Please log in.");
            }
            Err(e) => {
                self.log.error("password_reset_failed", error_kind(&e), None);
                output::error(&e.to_string());
            }
        }
        Ok(())
    }

    fn home(&mut self) -> Result<bool> {
        self.screen("home");
        let cart_label = format!("Cart ({})", self.ctx.cart.len());
        let choice = Select::new()
            .with_prompt("What next?")
            .items(&[
                "Browse products",
                cart_label.as_str(),
                "Store locator",
                "Profile",
                "Quit",
            ])
            .default(0)
            .interact()?;

        match choice {
            0 => self.browse()?,
            1 => self.cart()?,
            2 => self.locator()?,
            3 => self.profile()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn browse(&mut self) -> Result<()> {
        self.screen("products");

        if self.ctx.catalog_service.state() != CatalogState::Ready {
            let spinner = fetch_spinner("Loading products...");
            let loaded = block_on(self.ctx.load_catalog())?;
            spinner.finish_and_clear();

            if let Err(e) = loaded {
                self.log.error("catalog_load_failed", &e.to_string(), None);
                output::error(&e.to_string());
                return Ok(());
            }
        }

        loop {
            let catalog = &self.ctx.catalog_service;
            if catalog.displayed().is_empty() {
                output::warning("No products available right now.");
                return Ok(());
            }

            let mut items: Vec<String> = catalog
                .displayed()
                .iter()
                .map(|p| {
                    let mark = if self.ctx.cart.contains(p) { "♥" } else { " " };
                    format!("{} {}  {}", mark, p.title, output::format_price(p.price))
                })
                .collect();
            let shown = items.len();
            let prompt = format!("Products ({} of {})", shown, catalog.products().len());
            items.push("Back".to_string());

            let choice = Select::new()
                .with_prompt(prompt)
                .items(&items)
                .default(0)
                .interact()?;
            if choice >= shown {
                return Ok(());
            }

            // Reaching the last row pulls in the next page
            if self.ctx.catalog_service.should_load_more(choice) {
                self.ctx.catalog_service.load_next_page();
            }

            let product = self.ctx.catalog_service.displayed()[choice].clone();
            self.product_detail(&product)?;
        }
    }

    fn product_detail(&mut self, product: &Product) -> Result<()> {
        self.screen("product_detail");
        println!();
        println!("{}", product.title.bold());
        println!(
            "{}  {}",
            output::format_price(product.price).green(),
            output::format_list_price(product)
        );
        println!(
            "Rating {:.1} ({} reviews)  {}",
            product.rating.rate,
            product.rating.count,
            product.category.dimmed()
        );
        println!();
        println!("{}", product.description);
        println!();

        loop {
            let toggle_label = if self.ctx.cart.contains(product) {
                "Remove from cart"
            } else {
                "Add to cart"
            };
            let choice = Select::new()
                .items(&[toggle_label, "Back"])
                .default(0)
                .interact()?;
            if choice != 0 {
                return Ok(());
            }

            if self.ctx.cart.toggle(product) {
                output::success("Added to cart");
            } else {
                output::warning("Removed from cart");
            }
        }
    }

    fn cart(&mut self) -> Result<()> {
        loop {
            self.screen("cart");
            let items = self.ctx.cart.items();
            if items.is_empty() {
                output::warning("Your cart is empty.");
                return Ok(());
            }

            println!("{}", output::product_table(&items));
            println!(
                "Total: {}",
                output::format_price(self.ctx.cart.total()).bold()
            );

            let choice = Select::new()
                .items(&["Checkout", "Remove items", "Clear cart", "Back"])
                .default(0)
                .interact()?;

            match choice {
                0 => self.checkout()?,
                1 => {
                    let labels: Vec<&str> = items.iter().map(|p| p.title.as_str()).collect();
                    let picked = MultiSelect::new()
                        .with_prompt("Items to remove (space to select)")
                        .items(&labels)
                        .interact()?;
                    let removed = self.ctx.cart.remove_at(&picked);
                    output::info(&format!("Removed {} item(s)", removed));
                }
                2 => {
                    if Confirm::new()
                        .with_prompt("Empty the cart?")
                        .default(false)
                        .interact()?
                    {
                        self.ctx.cart.clear();
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn checkout(&mut self) -> Result<()> {
        self.screen("checkout");
        let mut draft = self.ctx.checkout_service.draft(&self.ctx.cart);

        let lines: Vec<(u32, String)> = draft
            .lines
            .iter()
            .map(|l| (l.product.id, l.product.title.clone()))
            .collect();
        for (id, title) in lines {
            let quantity: u32 = Input::new()
                .with_prompt(format!("Quantity of {}", title))
                .default(MIN_QUANTITY)
                .validate_with(|q: &u32| -> std::result::Result<(), String> {
                    if (MIN_QUANTITY..=MAX_QUANTITY).contains(q) {
                        Ok(())
                    } else {
                        Err(format!("Enter {} to {}", MIN_QUANTITY, MAX_QUANTITY))
                    }
                })
                .interact_text()?;
            draft.set_quantity(id, quantity)?;
        }

        let methods: Vec<String> = PaymentMethod::ALL.iter().map(|m| m.to_string()).collect();
        let method = Select::new()
            .with_prompt("Payment method")
            .items(&methods)
            .default(0)
            .interact()?;
        draft.set_payment_method(PaymentMethod::ALL[method]);

        let pin_code: String = Input::new()
            .with_prompt("Pin code")
            .allow_empty(true)
            .interact_text()?;
        draft.set_pin_code(pin_code);

        println!("Order total: {}", output::format_price(draft.total()).bold());
        if !Confirm::new()
            .with_prompt("Place order?")
            .default(true)
            .interact()?
        {
            output::warning("Order not placed.");
            return Ok(());
        }

        match self.ctx.checkout_service.confirm(draft, &self.ctx.session) {
            Ok(order) => {
                self.log.event("order_placed");
                let name = order
                    .customer
                    .as_ref()
                    .map(|c| c.display_name().to_string())
                    .unwrap_or_else(|| "Buddy".to_string());
                output::success(&format!("Thank you {}! Your order is confirmed.", name));
                println!("  Total: {}", output::format_price(order.total));
                println!("  Payment: {}", order.payment_method);
                if !order.pin_code.is_empty() {
                    println!("  Ship to pin code: {}", order.pin_code);
                }
            }
            Err(e) => output::error(&e.to_string()),
        }
        Ok(())
    }

    fn locator(&mut self) -> Result<()> {
        self.screen("map");
        loop {
            let current = self.ctx.locator.current().clone();
            let region = self.ctx.locator.region();
            println!(
                "{} - {} ({:.4}, {:.4})",
                current.name.bold(),
                current.city_name,
                region.center.latitude,
                region.center.longitude
            );

            let choice = Select::new()
                .items(&["Next store", "Choose from list", "Store details", "Back"])
                .default(0)
                .interact()?;

            match choice {
                0 => {
                    self.ctx.locator.advance();
                }
                1 => {
                    self.ctx.locator.toggle_list();
                    let names: Vec<String> = self
                        .ctx
                        .locator
                        .locations()
                        .iter()
                        .map(|l| format!("{} ({})", l.name, l.city_name))
                        .collect();
                    let index = Select::new()
                        .with_prompt("Stores")
                        .items(&names)
                        .default(0)
                        .interact()?;
                    let picked = self.ctx.locator.locations()[index].clone();
                    self.ctx.locator.select(&picked);
                }
                2 => {
                    self.ctx.locator.show_details(&current);
                    if let Some(detail) = self.ctx.locator.detail() {
                        println!();
                        println!("{}", detail.description);
                        println!("Photos: {}", detail.image_names.join(", "));
                        println!("More: {}", detail.link.cyan());
                        println!();
                    }
                    self.ctx.locator.hide_details();
                }
                _ => return Ok(()),
            }
        }
    }

    fn profile(&mut self) -> Result<()> {
        self.screen("profile");
        if let Some(user) = self.ctx.session.current_user() {
            println!("Hi {}!", user.display_name().bold());
            println!("  {}", user.email);
        }

        let choice = Select::new()
            .items(&["Log out", "Delete account", "Back"])
            .default(2)
            .interact()?;

        match choice {
            0 => {
                self.ctx.auth_service.logout();
                self.log.event("logged_out");
                output::success("Logged out");
            }
            1 => {
                if Confirm::new()
                    .with_prompt("Delete your account?")
                    .default(false)
                    .interact()?
                {
                    self.ctx.auth_service.delete_account();
                    self.log.event("account_deleted");
                    output::warning("Signed out.");
                }
            }
            _ => {}
        }
        Ok(())
    }
}
