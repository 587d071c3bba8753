//! Ports command implementation

use anyhow::Result;

use terminal_queue::config::Config;
use terminal_queue::listener::free_ports;

/// Print the candidate port range and the state of each port
pub fn ports_command(config: &Config) -> Result<()> {
    let range = config.listener.port_range()?;
    let free = free_ports(&config.listener.host, range);

    println!(
        "Listener ports on {}: {} ({} free)\n",
        config.listener.host,
        range,
        free.len()
    );
    for port in range.ports() {
        let state = if free.contains(&port) { "free" } else { "in use" };
        println!("  {}  {}", port, state);
    }

    Ok(())
}
