//! Bundled sample epics, used when no input files are given.

pub const SAMPLE_EPICS: [&str; 2] = [
    "Title: Streamlined Smart Inventory Management for Retailers

Problem Statement: Retailers face challenges in managing inventory efficiently, leading to \
stockouts, overstocking, and lost sales opportunities. A smart inventory management system is \
needed to provide real-time stock tracking, automated restocking recommendations, and \
analytics to enhance decision-making.

User Stories:
1. As a store manager, I want to view real-time inventory levels across all store locations, \
so I can identify low-stock items and plan restocking.
2. As a warehouse staff member, I want to receive automated alerts for items that need \
restocking, so I can prioritize my tasks efficiently.",
    "Title: Enhanced Customer Onboarding Flow

Problem Statement: New users struggle with the current onboarding process, leading to high \
drop-off rates and increased support tickets during initial setup. This epic aims to redesign \
the onboarding experience to be more intuitive and guided, thereby improving user activation \
and reducing support overhead.

Non-Functional Requirements:
- The onboarding flow must load within 2 seconds on standard broadband connections.
- User data collected during onboarding must comply with GDPR regulations.",
];
