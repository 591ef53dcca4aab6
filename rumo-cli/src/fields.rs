use clap::Args;
use rumo_lib::{form::Message, revenue::Cost};

/// Everything that shapes the free revenue.
#[derive(Args, Debug, Clone, Default)]
pub struct Values {
    /// Expedition id or name, see `rumo catalog`
    #[arg(short, long)]
    pub expedition: Option<String>,
    /// Package value, replaces the expedition default
    #[arg(long)]
    pub package_value: Option<String>,
    /// Individual value, takes precedence over the package value
    #[arg(long)]
    pub individual_value: Option<String>,
    #[arg(long)]
    pub guides: Option<String>,
    #[arg(long)]
    pub commission: Option<String>,
    #[arg(long)]
    pub ferry: Option<String>,
    #[arg(long)]
    pub cooler: Option<String>,
    #[arg(long)]
    pub fuel: Option<String>,
}

impl Values {
    /// Form messages for the values given on the command line. The expedition comes
    /// first since selecting one resets the package value.
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = Vec::new();

        if let Some(expedition) = &self.expedition {
            messages.push(Message::ExpeditionSelected(expedition.clone()));
        }
        if let Some(value) = &self.package_value {
            messages.push(Message::PackageValueInput(value.clone()));
        }
        if let Some(value) = &self.individual_value {
            messages.push(Message::IndividualValueInput(value.clone()));
        }

        let costs = [
            (Cost::Guides, &self.guides),
            (Cost::Commission, &self.commission),
            (Cost::Ferry, &self.ferry),
            (Cost::Cooler, &self.cooler),
            (Cost::Fuel, &self.fuel),
        ];
        for (cost, value) in costs {
            if let Some(value) = value {
                messages.push(Message::CostInput(cost, value.clone()));
            }
        }

        messages
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct Fields {
    /// Expedition date, as AAAA-MM-DD or DD/MM/AAAA
    #[arg(short, long)]
    pub date: Option<String>,
    /// Internal seller
    #[arg(long)]
    pub seller: Option<String>,
    #[arg(long)]
    pub external_seller: Option<String>,
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub vehicle: Option<String>,
    #[arg(long)]
    pub observation: Option<String>,
    /// ABERTO or FECHADO
    #[arg(short, long)]
    pub status: Option<String>,
    #[command(flatten)]
    pub values: Values,
}

impl Fields {
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = self.values.messages();

        let text: [(&Option<String>, fn(String) -> Message); 7] = [
            (&self.date, Message::DateInput),
            (&self.seller, Message::SellerInput),
            (&self.external_seller, Message::ExternalSellerInput),
            (&self.client, Message::ClientNameInput),
            (&self.vehicle, Message::IdVehicleInput),
            (&self.observation, Message::ObservationInput),
            (&self.status, Message::StatusSelected),
        ];
        for (value, message) in text {
            if let Some(value) = value {
                messages.push(message(value.clone()));
            }
        }

        messages
    }
}
