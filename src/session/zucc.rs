//! `zucc`: the relational menu/orders desk
//!
//! Login, reset the tables and seed the menu, then serve the
//! view-menu / view-orders / place-order loop.

use crate::config::Settings;
use crate::db::OrderStore;
use crate::db::postgres::PostgresServer;
use crate::db::schema::Table;
use crate::display::menu_listing;
use crate::error::{DbResult, Result};
use crate::models::Order;
use crate::prompt::Prompter;
use crate::session::report;
use std::future::Future;
use std::io::{BufRead, Write};
use tracing::{info, warn};

const BANNER: &str = r"
   ______                   ____  __     __  __      __
  /__  / __  _______________/  _/ / /_   / / / /___  / /
    / / / / / / ___/ ___/ ___/ /  / __/  / / / / __ \/ /
   / /_/ /_/ / /__/ /__/ /___/ /  / /_   / /_/ / /_/ /_/
  /____|__,_/\___/\___/\___/___/  \__/   \____/ .___(_)
                                             /_/";

const MAIN_MENU: &str = "
====== Zucc It Up! ======
1. View menu
2. View orders
3. Place an order
4. Quit
=========================";

/// Full program: banner, login against the configured server, session
pub async fn start<R: BufRead, W: Write>(
    settings: &Settings,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    prompter.say(BANNER)?;
    prompter.say("\nWelcome to Zucc It Up!\n")?;

    let server = &settings.server;
    let store = login(prompter, |username, password| async move {
        PostgresServer::connect(server, &username, &password).await
    })
    .await?;

    run(&store, prompter, settings.reset_on_start).await
}

/// Ask for credentials until `connect` accepts them.
///
/// Rejected credentials and unreachable servers are reported and the
/// prompt repeats; `q` at the username prompt leaves.
pub async fn login<S, F, Fut, R, W>(prompter: &mut Prompter<R, W>, mut connect: F) -> Result<S>
where
    F: FnMut(String, String) -> Fut,
    Fut: Future<Output = DbResult<S>>,
    R: BufRead,
    W: Write,
{
    prompter.say("First, you will need to enter your database credentials.")?;
    loop {
        let username = prompter.line("Enter username: ")?;
        let password = prompter.password("Enter password: ")?;
        match connect(username, password).await {
            Ok(store) => {
                prompter.say("Credentials verified!")?;
                return Ok(store);
            }
            Err(e) if e.is_retryable_login() => {
                warn!("login failed: {}", e);
                prompter.say(&e)?;
                prompter.say("Username or Password was incorrect, could not connect\n")?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// The menu loop. Returns `Ok` when the user picks "Quit".
pub async fn run<S: OrderStore, R: BufRead, W: Write>(
    store: &S,
    prompter: &mut Prompter<R, W>,
    reset_on_start: bool,
) -> Result<()> {
    if reset_on_start {
        store.reset_tables().await?;
        store.populate_menu().await?;
        info!("tables reset and menu seeded");
    }

    loop {
        prompter.say(MAIN_MENU)?;
        let choice = prompter.line("Enter choice (1-4): ")?;
        let outcome = match choice.trim() {
            "1" => show_table(store, prompter, Table::Menu).await,
            "2" => show_table(store, prompter, Table::Orders).await,
            "3" => place_order(store, prompter).await,
            "4" => {
                prompter.say("Goodbye!")?;
                return Ok(());
            }
            _ => prompter.say("Invalid choice. Please try again."),
        };
        report(prompter, outcome)?;
    }
}

async fn show_table<S: OrderStore, R: BufRead, W: Write>(
    store: &S,
    prompter: &mut Prompter<R, W>,
    table: Table,
) -> Result<()> {
    let rendered = store.display_table(table).await?;
    prompter.say(rendered)
}

async fn place_order<S: OrderStore, R: BufRead, W: Write>(
    store: &S,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    prompter.say("\n--- Place Order ---")?;
    let menu = store.fetch_menu().await?;
    if menu.is_empty() {
        return prompter.say("The menu is empty, nothing to order.");
    }

    let customer = prompter.line("Customer name: ")?;
    prompter.say(menu_listing(&menu))?;

    let mut chosen = Vec::new();
    loop {
        let msg = if chosen.is_empty() {
            "Item number: "
        } else {
            "Another item number (blank to finish): "
        };
        let text = prompter.line(msg)?;
        let text = text.trim();
        if text.is_empty() {
            if chosen.is_empty() {
                prompter.say("Please choose at least one item.")?;
                continue;
            }
            break;
        }
        match text.parse::<usize>() {
            Ok(n) if (1..=menu.len()).contains(&n) => chosen.push(menu[n - 1].clone()),
            _ => prompter.say(format!(
                "Invalid input. Please enter a number between 1 and {}.",
                menu.len()
            ))?,
        }
    }

    let destination = prompter.line("Destination building: ")?;
    let order = Order::from_items(&customer, &chosen, &destination);
    store.insert_order(&order).await?;

    prompter.say(format!(
        "Order placed for {}: {} to {}, total ${:.2}",
        order.customer_name, order.items, order.destination, order.total
    ))
}
