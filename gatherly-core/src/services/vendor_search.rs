// src/services/vendor_search.rs

use std::sync::Arc;
use tracing::error;

use crate::Error;
use crate::repositories::postgres::vendors::VendorsRepository;
use crate::scoring::matching::match_vendor;
use gatherly_common::models::{EventRequirements, VendorListing};

/// Vendor discovery: fetch candidates, score each against the request, and
/// return listings in a deterministic order.
pub struct VendorSearchService<V>
where
    V: VendorsRepository,
{
    vendors_repo: Arc<V>,
}

impl<V> VendorSearchService<V>
where
    V: VendorsRepository,
{
    pub fn new(vendors_repo: Arc<V>) -> Self {
        Self { vendors_repo }
    }

    /// Listings sorted by score descending; equal scores fall back to
    /// vendor id ascending so repeated queries order identically.
    pub async fn search(&self, req: &EventRequirements) -> Result<Vec<VendorListing>, Error> {
        let vendors = self.vendors_repo.list_active(req.city.as_deref()).await?;

        let mut listings = Vec::with_capacity(vendors.len());
        for vendor in vendors {
            let services = match self.vendors_repo.services_for_vendor(vendor.vendor_id).await {
                Ok(s) => s,
                Err(e) => {
                    error!("Failed to load services for vendor {}: {:?}", vendor.vendor_id, e);
                    continue;
                }
            };
            let match_result = match_vendor(&vendor, &services, req);
            listings.push(VendorListing {
                vendor,
                services,
                match_result,
            });
        }

        listings.sort_by(|a, b| {
            b.match_result
                .score
                .cmp(&a.match_result.score)
                .then(a.vendor.vendor_id.cmp(&b.vendor.vendor_id))
        });

        Ok(listings)
    }
}
