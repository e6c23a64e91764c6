//! Example: List network interfaces
//!
//! Run with: cargo run --example list_interfaces

use rawframes_capture::list_interfaces;

fn main() {
    for iface in list_interfaces() {
        println!("Interface: {} (index {})", iface.name, iface.index);
        if !iface.description.is_empty() {
            println!("  Description: {}", iface.description);
        }

        match iface.mac {
            Some(mac) => println!("  MAC Address: {}", mac),
            None => println!("  MAC Address: none"),
        }

        for ip in &iface.ips {
            println!("  IP: {}", ip);
        }

        println!("  Up: {}, Loopback: {}", iface.is_up, iface.is_loopback);
        println!("  Can inject: {}", iface.can_inject());
        println!();
    }
}
